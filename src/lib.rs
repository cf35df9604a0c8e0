pub mod check;
pub mod cli;
pub mod compile;
pub mod config;
pub mod diagnostic;
pub mod formatter;
pub mod parse;

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};

use check::registry::CheckRegistry;
use check::{select_checks, validate_source};
use cli::{CHECK_PROGRAM, CheckArgs, CompileArgs, check_usage};
use compile::{compile_source, write_blocks};
use config::{ResolvedConfig, load_config};
use formatter::create_formatter;
use parse::source::SourceFile;

fn debug_config(config: &ResolvedConfig) {
    match config.config_path() {
        Some(path) => eprintln!("debug: config loaded from: {}", path.display()),
        None => eprintln!("debug: no config file found"),
    }
}

/// Run the pattern compiler. Returns the exit code: 0 = success, 2 = error.
pub fn run_compile(args: CompileArgs) -> Result<i32> {
    let start = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let markers: Vec<String> = if args.markers.is_empty() {
        config.markers().to_vec()
    } else {
        args.markers.clone()
    };

    if args.debug {
        debug_config(&config);
        eprintln!("debug: active markers: {}", markers.join(", "));
    }

    let source = SourceFile::from_path(&args.input)?;
    let result = compile_source(&source, &markers);

    for skipped in &result.skipped {
        eprintln!(
            "warning: {}:{}: {skipped}",
            source.path_str(),
            skipped.line
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_blocks(&result.blocks, &mut out).context("failed to write output")?;
    out.flush().context("failed to write output")?;

    if args.debug {
        eprintln!(
            "debug: {} lines read, {} blocks emitted, {} lines skipped",
            result.lines_read,
            result.blocks.len(),
            result.skipped.len()
        );
        eprintln!("debug: compile total: {:.0?}", start.elapsed());
    }

    Ok(0)
}

/// Run the mapping-rule checker. Returns the exit code: 0 = finished
/// (warnings or not), 1 = usage error, 2 = error.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let start = Instant::now();
    let registry = CheckRegistry::default_registry();

    // --list-checks: print all registered check names and exit
    if args.list_checks {
        for check in registry.checks() {
            let suffix = if check.enabled_by_default() {
                ""
            } else {
                " (disabled by default)"
            };
            println!("{}{suffix}", check.name());
        }
        return Ok(0);
    }

    let Some(path) = args.file.as_deref() else {
        println!("{}", check_usage(CHECK_PROGRAM));
        return Ok(1);
    };

    let config = load_config(args.config.as_deref())?;
    let checks = select_checks(&registry, &config, &args.only, &args.except, args.strict)?;
    let line_numbers = args.line_numbers || config.line_numbers();

    if args.debug {
        debug_config(&config);
        let names: Vec<&str> = checks.iter().map(|c| c.name()).collect();
        eprintln!("debug: enabled checks: {}", names.join(", "));
    }

    let source = SourceFile::from_path(path)?;
    let result = validate_source(&source, &checks);

    let formatter = create_formatter(&args.format, line_numbers);
    formatter
        .print(&result)
        .context("failed to write output")?;

    if args.debug {
        eprintln!(
            "debug: {} lines read, {} rules inspected",
            result.lines.len(),
            result.rules_inspected
        );
        eprintln!("debug: check total: {:.0?}", start.elapsed());
    }
    if args.summary {
        eprintln!("Warnings: {}", result.warning_count);
    }

    Ok(0)
}
