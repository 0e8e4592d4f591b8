#![recursion_limit = "2048"]

use std::{env, io, process};

use noexcept_bench::{BenchConfig, logging, run};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", BenchConfig::help());
        return;
    }
    logging::init_tracing();

    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match BenchConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            eprint!("{}", BenchConfig::help());
            process::exit(err.exit_code());
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run(&config, &mut out) {
        eprintln!("benchmark failed: {err}");
        process::exit(err.exit_code());
    }
}
