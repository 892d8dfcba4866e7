extern crate ansi_term;
extern crate ctrlc;
use ansi_term::{Colour, Style};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tinyc::lang::{self, Error, ErrorCode};
use tinyc::mach::{self, Allocator, Event, Runtime, DEFAULT_MEMORY};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Script to compile and run
    script: PathBuf,

    /// Print the compiled bytecode instead of running it
    #[arg(short = 'l', long)]
    listing: bool,

    /// Print each instruction to stderr before it executes
    #[arg(short = 't', long)]
    trace: bool,

    /// Print the variable table when the program finishes
    #[arg(long)]
    vars: bool,

    /// Size of the simulated memory pool in bytes
    #[arg(short = 'm', long, default_value_t = DEFAULT_MEMORY)]
    memory: usize,
}

pub fn main() {
    let cli = Cli::parse();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
    }
    let code = match main_loop(&cli, interrupted) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            1
        }
    };
    std::process::exit(code);
}

fn main_loop(cli: &Cli, interrupted: Arc<AtomicBool>) -> std::io::Result<i32> {
    let source = std::fs::read_to_string(&cli.script)?;
    let program = match lang::parse_str(&source).and_then(|ast| mach::compile(&ast)) {
        Ok(program) => program,
        Err(error) => {
            report(&error);
            return Ok(error.exit_code());
        }
    };
    if cli.listing {
        print!("{}", program);
        return Ok(0);
    }

    let mut runtime = Runtime::new(program, Allocator::new(cli.memory));
    runtime.set_trace(cli.trace);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        };
        match runtime.execute(5000) {
            Event::Running => {}
            Event::Print(s) => {
                stdout.write_all(s.as_bytes())?;
            }
            Event::Input => {
                stdout.flush()?;
                let mut line = String::new();
                stdin.lock().read_line(&mut line)?;
                runtime.enter(line.trim_end_matches(&['\r', '\n'][..]));
            }
            Event::Trace(s) => {
                eprintln!("{}", Style::new().dimmed().paint(s));
            }
            Event::Error(error) => {
                stdout.flush()?;
                report(&error);
                return Ok(error.exit_code());
            }
            Event::Stopped => {
                if cli.vars {
                    writeln!(stdout, "{}", runtime.vars())?;
                }
                writeln!(stdout, "Execution finished with exit code 0")?;
                stdout.flush()?;
                return Ok(0);
            }
        }
    }
}

fn report(error: &Error) {
    let text = if error.is(ErrorCode::Raised) {
        format!("{}. finished with code {}", error, error.exit_code())
    } else {
        format!(
            "invalid operation. {}. finished with code {}",
            error,
            error.exit_code()
        )
    };
    eprintln!("{}", Colour::Red.bold().paint(text));
}
