#![allow(dead_code)]
use tinyc::lang::parse_str;
use tinyc::mach::{compile, Allocator, Event, Runtime};

pub fn runtime(source: &str) -> Runtime {
    runtime_with_memory(source, 1 << 20)
}

pub fn runtime_with_memory(source: &str, memory: usize) -> Runtime {
    let ast = parse_str(source).unwrap();
    let program = compile(&ast).unwrap();
    Runtime::new(program, Allocator::new(memory))
}

pub fn run(source: &str) -> String {
    exec(&mut runtime(source))
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_input(runtime, &[])
}

/// Runs until the program stops, answering input requests from `input`.
/// Errors are appended to the output as a line of text.
pub fn exec_input(runtime: &mut Runtime, input: &[&str]) -> String {
    let mut s = String::new();
    let mut input = input.iter();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(5000);
        match &event {
            Event::Stopped => break,
            Event::Running => {
                if prev_running {
                    s.push_str("\nExecution cycles exceeded.\n");
                    break;
                }
            }
            Event::Print(ps) => s.push_str(ps),
            Event::Input => match input.next() {
                Some(line) => {
                    runtime.enter(line);
                }
                None => break,
            },
            Event::Trace(_) => {}
            Event::Error(error) => s.push_str(&format!("{}\n", error)),
        }
        prev_running = matches!(event, Event::Running);
    }
    s
}
