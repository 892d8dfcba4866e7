use super::{Allocator, Val};
use crate::error;
use crate::lang::Error;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

pub const DEFAULT_CAPACITY: usize = 8;
pub const DEFAULT_LOAD_FACTOR: f64 = 0.6;

/// ## Variable memory
///
/// Open addressing with linear probing. Deleted slots become tombstones
/// that keep probe chains intact and count toward the load factor until
/// the next resize. Every stored pair is charged to the allocator.

#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    key: Rc<str>,
    value: Val,
}

impl Pair {
    pub fn key(&self) -> &Rc<str> {
        &self.key
    }
    pub fn value(&self) -> &Val {
        &self.value
    }
    fn footprint(&self) -> usize {
        std::mem::size_of::<Rc<str>>() + self.key.len() + self.value.footprint()
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Empty,
    Deleted,
    Occupied(Pair),
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    slots: Vec<Slot>,
    threshold: f64,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            slots: SymbolTable::empty_slots(DEFAULT_CAPACITY),
            threshold: DEFAULT_LOAD_FACTOR,
        }
    }

    pub fn with_capacity(capacity: usize, threshold: f64) -> Result<SymbolTable> {
        if capacity == 0 {
            return Err(error!(InternalError; "CAPACITY MUST BE POSITIVE"));
        }
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(error!(InternalError; "LOAD FACTOR OUT OF RANGE"));
        }
        Ok(SymbolTable {
            slots: SymbolTable::empty_slots(capacity),
            threshold,
        })
    }

    fn empty_slots(capacity: usize) -> Vec<Slot> {
        (0..capacity).map(|_| Slot::Empty).collect()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Occupied slots and tombstones over capacity.
    pub fn load_factor(&self) -> f64 {
        let taken = self
            .slots
            .iter()
            .filter(|slot| !matches!(slot, Slot::Empty))
            .count();
        taken as f64 / self.slots.len() as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pair> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(pair) => Some(pair),
            _ => None,
        })
    }

    pub fn get(&self, key: &str) -> Result<&Val> {
        match self.position(key).map(|index| &self.slots[index]) {
            Some(Slot::Occupied(pair)) => Ok(&pair.value),
            _ => Err(error!(KeyNotFound; key)),
        }
    }

    pub fn get_or_default(&self, key: &str, default: Val) -> Val {
        match self.get(key) {
            Ok(val) => val.clone(),
            Err(_) => default,
        }
    }

    /// Insert or overwrite. Keys stay unique: the probe continues past
    /// tombstones until the key or an empty slot is found. An overwritten
    /// pair is released before the new one is claimed, and reclaimed if
    /// that claim fails.
    pub fn set(&mut self, memory: &mut Allocator, key: Rc<str>, value: Val) -> Result<()> {
        if self.load_factor() >= self.threshold {
            self.resize(memory)?;
        }
        let pair = Pair { key, value };
        let mut vacant = None;
        let mut found = None;
        for index in self.probe(&pair.key) {
            match &self.slots[index] {
                Slot::Empty => {
                    vacant = vacant.or(Some(index));
                    break;
                }
                Slot::Deleted => vacant = vacant.or(Some(index)),
                Slot::Occupied(p) if p.key == pair.key => {
                    found = Some(index);
                    break;
                }
                Slot::Occupied(_) => {}
            }
        }
        let index = match found.or(vacant) {
            Some(index) => index,
            None => return Err(error!(InternalError; "SYMBOL TABLE FULL")),
        };
        let released = match &self.slots[index] {
            Slot::Occupied(old) => old.footprint(),
            _ => 0,
        };
        memory.free(released);
        if let Err(error) = memory.allocate(pair.footprint()) {
            memory.allocate(released)?;
            return Err(error);
        }
        self.slots[index] = Slot::Occupied(pair);
        Ok(())
    }

    pub fn delete(&mut self, memory: &mut Allocator, key: &str) -> Result<()> {
        let index = match self.position(key) {
            Some(index) => index,
            None => return Err(error!(KeyNotFound; key)),
        };
        if let Slot::Occupied(pair) = std::mem::replace(&mut self.slots[index], Slot::Deleted) {
            memory.free(pair.footprint());
        }
        Ok(())
    }

    /// Double the capacity and rehash live pairs. Tombstones are dropped.
    /// The new copies are claimed before the old ones are released.
    fn resize(&mut self, memory: &mut Allocator) -> Result<()> {
        let claimed: usize = self.iter().map(Pair::footprint).sum();
        memory.allocate(claimed)?;
        let capacity = self.slots.len() * 2;
        let old = std::mem::replace(&mut self.slots, SymbolTable::empty_slots(capacity));
        for slot in old {
            if let Slot::Occupied(pair) = slot {
                let index = self
                    .probe(&pair.key)
                    .find(|&index| matches!(self.slots[index], Slot::Empty));
                if let Some(index) = index {
                    self.slots[index] = Slot::Occupied(pair);
                }
            }
        }
        memory.free(claimed);
        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        for index in self.probe(key) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(pair) if &*pair.key == key => return Some(index),
                _ => {}
            }
        }
        None
    }

    fn probe(&self, key: &str) -> impl Iterator<Item = usize> {
        let capacity = self.slots.len();
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let start = (hasher.finish() % capacity as u64) as usize;
        (0..capacity).map(move |step| (start + step) % capacity)
    }
}

impl std::fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, pair) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match &pair.value {
                Val::String(s) => write!(f, "{}: {:?}", pair.key, s)?,
                val => write!(f, "{}: {}", pair.key, val)?,
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_set_get_overwrite() {
        let mut memory = Allocator::new(1 << 20);
        let mut table = SymbolTable::new();
        table.set(&mut memory, "x".into(), Val::from(1)).unwrap();
        let used = memory.used_memory();
        table.set(&mut memory, "x".into(), Val::from(2)).unwrap();
        assert_eq!(table.get("x"), Ok(&Val::from(2)));
        assert_eq!(table.len(), 1);
        assert_eq!(memory.used_memory(), used);
    }

    #[test]
    fn test_missing_key() {
        let table = SymbolTable::new();
        assert!(table.get("nope").unwrap_err().is(ErrorCode::KeyNotFound));
        assert_eq!(table.get_or_default("nope", Val::from(7)), Val::from(7));
    }

    #[test]
    fn test_delete_leaves_tombstone() {
        let mut memory = Allocator::new(1 << 20);
        let mut table = SymbolTable::new();
        table.set(&mut memory, "a".into(), Val::from(1)).unwrap();
        table.set(&mut memory, "b".into(), Val::from(2)).unwrap();
        let load = table.load_factor();
        table.delete(&mut memory, "a").unwrap();
        assert_eq!(table.load_factor(), load);
        assert!(table.get("a").is_err());
        assert_eq!(table.get("b"), Ok(&Val::from(2)));
        assert!(table
            .delete(&mut memory, "a")
            .unwrap_err()
            .is(ErrorCode::KeyNotFound));
        table.delete(&mut memory, "b").unwrap();
        assert_eq!(memory.used_memory(), 0);
    }

    #[test]
    fn test_resize_keeps_pairs() {
        let mut memory = Allocator::new(1 << 20);
        let mut table = SymbolTable::new();
        for n in 0..20 {
            table
                .set(&mut memory, format!("v{}", n).as_str().into(), Val::from(n))
                .unwrap();
        }
        assert_eq!(table.len(), 20);
        assert!(table.capacity() >= 32);
        assert!(table.load_factor() < 1.0);
        for n in 0..20 {
            assert_eq!(table.get(&format!("v{}", n)), Ok(&Val::from(n)));
        }
        let expected: usize = table.iter().map(Pair::footprint).sum();
        assert_eq!(memory.used_memory(), expected);
    }

    #[test]
    fn test_out_of_memory() {
        let mut memory = Allocator::new(8);
        let mut table = SymbolTable::new();
        let err = table.set(&mut memory, "x".into(), Val::from(1)).unwrap_err();
        assert!(err.is(ErrorCode::OutOfMemory));
        assert!(table.is_empty());
    }

    #[test]
    fn test_overwrite_in_full_pool() {
        let pair = Pair {
            key: "x".into(),
            value: Val::from(1),
        };
        let mut memory = Allocator::new(pair.footprint());
        let mut table = SymbolTable::new();
        table.set(&mut memory, "x".into(), Val::from(1)).unwrap();
        assert_eq!(memory.free_memory(), 0);
        table.set(&mut memory, "x".into(), Val::from(2)).unwrap();
        assert_eq!(table.get("x"), Ok(&Val::from(2)));
        assert_eq!(memory.free_memory(), 0);
        let err = table
            .set(&mut memory, "x".into(), Val::from("too long"))
            .unwrap_err();
        assert!(err.is(ErrorCode::OutOfMemory));
        assert_eq!(table.get("x"), Ok(&Val::from(2)));
        assert_eq!(memory.used_memory(), pair.footprint());
    }

    #[test]
    fn test_bad_construction() {
        assert!(SymbolTable::with_capacity(0, 0.5).is_err());
        assert!(SymbolTable::with_capacity(4, 0.0).is_err());
        assert!(SymbolTable::with_capacity(4, 1.5).is_err());
        assert_eq!(SymbolTable::with_capacity(4, 1.0).unwrap().capacity(), 4);
    }

    #[test]
    fn test_display() {
        let mut memory = Allocator::new(1 << 20);
        let mut table = SymbolTable::new();
        table.set(&mut memory, "s".into(), Val::from("hi")).unwrap();
        assert_eq!(table.to_string(), "{s: \"hi\"}");
    }
}
