use std::process;

use clap::Parser;

use relex_rules::cli::CompileArgs;

fn main() {
    let args = CompileArgs::parse();
    match relex_rules::run_compile(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}
