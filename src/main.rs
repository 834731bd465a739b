use std::env;

use monkey_lang::repl::{run_file, run_prompt};

pub fn main() -> std::io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    // args always includes the program name in args[0]
    match args.len() {
        1 => {
            let stdin = std::io::stdin();
            run_prompt(stdin.lock(), std::io::stdout())
        }
        2 => run_file(&args[1]),
        _ => {
            println!("Usage: monkey [script]");
            std::process::exit(64);
        }
    }
}
