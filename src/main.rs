//! Tabula - runs edit scripts against a spreadsheet document

use std::env;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use tabula::script::run_script;
use tabula::{Config, evaluate_command, logging};
use tabula_core::Document;

fn print_usage() {
    eprintln!("Usage: tabula [OPTIONS] [SCRIPT]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [SCRIPT]                  Edit script to run (reads stdin when omitted)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>   Evaluate one formula and print the result");
    eprintln!("  --config <FILE>           Load settings from FILE instead of the default");
    eprintln!("  -h, --help                Print help");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut script_path: Option<PathBuf> = None;
    let mut command: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires a formula");
                    std::process::exit(1);
                }
                command = Some(args[i].to_string());
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') && arg != "-" => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if script_path.is_none() {
                    script_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(config.log_filter());

    if let Some(formula) = command {
        let (value, failed) = evaluate_command(&formula);
        println!("{}", value);
        if failed {
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run(script_path, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(script_path: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let text = match script_path.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let mut doc = Document::with_history_limit(config.history_limit);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_script(&mut doc, &text, config.export_dims(), &mut out)?;
    Ok(())
}
