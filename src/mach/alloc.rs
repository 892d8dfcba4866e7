use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Size of the simulated memory pool when none is given: 8 GiB.
pub const DEFAULT_MEMORY: usize = 8 * 1024 * 1024 * 1024;

/// ## Simulated memory pool
///
/// Nothing is actually stored in the pool. It is bookkeeping that puts a
/// ceiling on the bytes held by the operand stack and the symbol table.
/// The block list always covers `[0, size)` without gaps or overlap.
///
/// Frees are by size, not by handle: releasing `n` bytes returns the first
/// `n` used bytes in block order to the free list, whoever claimed them.
/// Only the counters are exact.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    start: usize,
    size: usize,
    used: bool,
}

impl Block {
    pub fn start(&self) -> usize {
        self.start
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn end(&self) -> usize {
        self.start + self.size
    }
    pub fn is_used(&self) -> bool {
        self.used
    }
}

#[derive(Debug, Clone)]
pub struct Allocator {
    size: usize,
    free: usize,
    blocks: Vec<Block>,
}

impl Default for Allocator {
    fn default() -> Self {
        Allocator::new(DEFAULT_MEMORY)
    }
}

impl Allocator {
    pub fn new(size: usize) -> Allocator {
        let mut blocks = vec![];
        if size > 0 {
            blocks.push(Block {
                start: 0,
                size,
                used: false,
            });
        }
        Allocator {
            size,
            free: size,
            blocks,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn free_memory(&self) -> usize {
        self.free
    }

    pub fn used_memory(&self) -> usize {
        self.size - self.free
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// First fit. A request may span several free blocks; the last one
    /// touched is split so only the requested bytes are marked used.
    pub fn allocate(&mut self, size: usize) -> Result<()> {
        if size > self.free {
            return Err(error!(OutOfMemory));
        }
        let mut remaining = size;
        let mut index = 0;
        while remaining > 0 && index < self.blocks.len() {
            let block = &mut self.blocks[index];
            if !block.used {
                if block.size <= remaining {
                    block.used = true;
                    remaining -= block.size;
                } else {
                    let rest = Block {
                        start: block.start + remaining,
                        size: block.size - remaining,
                        used: false,
                    };
                    block.size = remaining;
                    block.used = true;
                    remaining = 0;
                    self.blocks.insert(index + 1, rest);
                }
            }
            index += 1;
        }
        debug_assert_eq!(remaining, 0);
        self.free -= size;
        Ok(())
    }

    /// Releases up to `size` bytes, never more than are in use.
    pub fn free(&mut self, size: usize) {
        let mut remaining = size;
        let mut index = 0;
        while remaining > 0 && index < self.blocks.len() {
            let block = &mut self.blocks[index];
            if block.used {
                if block.size <= remaining {
                    block.used = false;
                    remaining -= block.size;
                } else {
                    let kept = block.size - remaining;
                    let released = Block {
                        start: block.start + kept,
                        size: remaining,
                        used: false,
                    };
                    block.size = kept;
                    remaining = 0;
                    self.blocks.insert(index + 1, released);
                }
            }
            index += 1;
        }
        self.free += size - remaining;
        self.coalesce();
    }

    /// Merge runs of adjacent free blocks.
    fn coalesce(&mut self) {
        let mut merged: Vec<Block> = Vec::with_capacity(self.blocks.len());
        for block in self.blocks.drain(..) {
            match merged.last_mut() {
                Some(last) if !last.used && !block.used => last.size += block.size,
                _ => merged.push(block),
            }
        }
        self.blocks = merged;
    }
}

impl std::fmt::Display for Allocator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} BYTES USED, {} BYTES FREE, {} BLOCKS",
            self.used_memory(),
            self.free_memory(),
            self.blocks.len()
        )
    }
}
