use std::process;

use clap::Parser;
use clap::error::ErrorKind;

use relex_rules::cli::{CHECK_PROGRAM, CheckArgs, check_usage};

fn main() {
    let args = match CheckArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprint!("{}", e.render());
            println!("{}", check_usage(CHECK_PROGRAM));
            process::exit(1);
        }
    };
    match relex_rules::run_check(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}
