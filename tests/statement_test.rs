mod common;
use common::*;
use tinyc::lang::ErrorCode;
use tinyc::mach::{Allocator, Event, Opcode, Program, Runtime, Val, Word};

#[test]
fn test_while_loop() {
    let s = "i = 0; while (i < 3) { puts i; i = i + 1; }";
    assert_eq!(run(s), "0\n1\n2\n");
}

#[test]
fn test_goto_skips_statement() {
    assert_eq!(run("goto skip; puts 1; skip: puts 2;"), "2\n");
}

#[test]
fn test_goto_backward() {
    let s = "i = 0; top: puts i; i = i + 1; if (i < 2) goto top;";
    assert_eq!(run(s), "0\n1\n");
}

#[test]
fn test_undefined_label_only_fails_when_reached() {
    assert_eq!(run("if (0) goto nowhere; puts 7;"), "7\n");
    assert_eq!(run("puts 1; goto nowhere;"), "1\nUNDEFINED LABEL IN 3\n");
}

#[test]
fn test_if_else() {
    let s = r#"x = 5; if (x < 3) puts "small"; else puts "big";"#;
    assert_eq!(run(s), "big\n");
    let s = r#"x = 1; if (x < 3) puts "small"; else puts "big";"#;
    assert_eq!(run(s), "small\n");
    assert_eq!(run("if (1) { puts 1; puts 2; }"), "1\n2\n");
}

#[test]
fn test_division_by_zero_before_store() {
    let mut r = runtime("x = 10 / 0;");
    assert_eq!(exec(&mut r), "DIVISION BY ZERO IN 4\n");
    assert!(r.vars().get("x").unwrap_err().is(ErrorCode::KeyNotFound));
}

#[test]
fn test_side_effects_survive_error() {
    let mut r = runtime("a = 1; puts a; b = a / 0;");
    assert_eq!(exec(&mut r), "1\nDIVISION BY ZERO IN 11\n");
    assert_eq!(r.vars().get("a"), Ok(&Val::Integer(1)));
}

#[test]
fn test_chained_assignment() {
    assert_eq!(run("a = b = 4; puts a + b;"), "8\n");
    assert_eq!(run("puts x = 3; puts x;"), "3\n3\n");
}

#[test]
fn test_expression_statement_is_discarded() {
    let mut r = runtime("1 + 2; puts 3;");
    assert_eq!(exec(&mut r), "3\n");
    assert_eq!(r.memory().used_memory(), 0);
}

#[test]
fn test_undefined_variable() {
    assert_eq!(run("puts y;"), "KEY NOT FOUND IN 0; y\n");
}

#[test]
fn test_raise() {
    let mut r = runtime(r#"puts 1; raise "bad input";"#);
    assert_eq!(r.execute(100), Event::Print("1\n".to_string()));
    match r.execute(100) {
        Event::Error(error) => {
            assert!(error.is(ErrorCode::Raised));
            assert_eq!(error.to_string(), "bad input");
            assert_eq!(error.exit_code(), 2);
        }
        event => panic!("{:?}", event),
    }
    assert_eq!(r.execute(100), Event::Stopped);
}

#[test]
fn test_reserved_name() {
    let prog = Program::from(vec![
        Word::Opcode(Opcode::Fetch),
        Word::Name("puts".into()),
        Word::Opcode(Opcode::Output),
        Word::Opcode(Opcode::Finish),
    ]);
    let mut r = Runtime::new(prog, Allocator::new(1 << 20));
    assert_eq!(exec(&mut r), "RESERVED NAME IN 0; puts\n");
}

#[test]
fn test_out_of_memory() {
    let mut r = runtime_with_memory(r#"s = "abcd"; while (1) s = s + s;"#, 4096);
    let out = exec(&mut r);
    assert!(out.starts_with("OUT OF MEMORY IN"), "{}", out);
    assert!(r.memory().used_memory() <= 4096);
}

#[test]
fn test_repetition_is_bounded_by_memory() {
    let mut r = runtime_with_memory(r#"puts "ab" * 40000000000000;"#, 4096);
    assert_eq!(exec(&mut r), "OUT OF MEMORY IN 4\n");
    assert_eq!(r.memory().used_memory(), 0);
    let mut r = runtime_with_memory("puts [1] * 1000000;", 4096);
    assert_eq!(exec(&mut r), "OUT OF MEMORY IN 7\n");
    let mut r = runtime_with_memory(r#"puts "ab" * 3;"#, 4096);
    assert_eq!(exec(&mut r), "ababab\n");
}

#[test]
fn test_overwrite_in_pool_sized_for_one_pair() {
    let mut r = runtime_with_memory("x = 1; x = 2; puts x;", 80);
    assert_eq!(exec(&mut r), "2\n");
    assert_eq!(r.vars().get("x"), Ok(&Val::Integer(2)));
}

#[test]
fn test_memory_released_after_finish() {
    let mut r = runtime("puts [1, 2] + [3];");
    assert_eq!(exec(&mut r), "[1, 2, 3]\n");
    assert_eq!(r.memory().used_memory(), 0);
    let mut r = runtime(r#"x = 1; y = "ab"; x = 2;"#);
    assert_eq!(exec(&mut r), "");
    assert_eq!(r.vars().len(), 2);
    assert!(r.memory().used_memory() > 0);
}

#[test]
fn test_runaway_loop() {
    assert_eq!(run("while (1) ;"), "\nExecution cycles exceeded.\n");
}
