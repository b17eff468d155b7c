use std::fs;

use clap::Parser;
use kodiscript::{Runner, Value};

/// kodiscript runs short embeddable scripts from `.kodi` files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the script file to execute.
    file: String,

    /// Abort the run after this many evaluated operations.
    #[arg(long)]
    max_ops: Option<u64>,

    /// Abort the run after this many milliseconds of wall-clock time.
    #[arg(long)]
    timeout: Option<i64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let source = fs::read_to_string(&args.file).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  &args.file);
        std::process::exit(1);
    });

    let mut runner = Runner::new();
    if let Some(limit) = args.max_ops {
        runner = runner.max_operations(limit);
    }
    if let Some(timeout) = args.timeout {
        runner = runner.timeout_ms(timeout);
    }

    let result = runner.execute(&source);

    for line in &result.output {
        println!("{line}");
    }

    if result.errors.is_empty() {
        if !matches!(result.value, Value::Null) {
            println!("{}", result.value);
        }
    } else {
        for error in &result.errors {
            eprintln!("{error}");
        }
        std::process::exit(1);
    }
}
