//! EFS model CLI
//!
//! Checks model documents and renames or moves their elements, rewriting
//! every dependent expression.

mod commands;

use commands::{check_model, move_element, parse_refactor_args, rename_element};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: efs check <model.json>");
                std::process::exit(1);
            }
            check_model(&args[2]);
        }
        command @ ("rename" | "move") => {
            let Some(options) = parse_refactor_args(&args[2..]) else {
                if command == "rename" {
                    eprintln!("Usage: efs rename <model.json> <Name> <NewName> [-o <out>]");
                } else {
                    eprintln!("Usage: efs move <model.json> <Name> <Parent> [-o <out>]");
                    eprintln!();
                    eprintln!("Use `.` as the target to move to the top level.");
                }
                std::process::exit(1);
            };
            if command == "rename" {
                rename_element(&options);
            } else {
                move_element(&options);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("efs {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("EFS model tool");
    println!();
    println!("Usage: efs <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <model.json>                       Compile and report diagnostics");
    println!("  rename <model.json> <Name> <NewName>     Rename an element");
    println!("  move <model.json> <Name> <Parent>        Move an element");
    println!("  help                                     Show this message");
    println!("  version                                  Show version");
    println!();
    println!("Refactorings write the model back in place unless `-o <out.json>` is given.");
    println!("Set RUST_LOG (e.g. RUST_LOG=efs_model=debug) for tracing output.");
}

/// Install a tracing subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
