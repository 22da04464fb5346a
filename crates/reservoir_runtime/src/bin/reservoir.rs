//! Reservoir registry CLI entry point.

use reservoir_runtime::shell::print_error;
use reservoir_runtime::{Shell, ShellConfig};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    demo: bool,
    portable: bool,
    show_help: bool,
    show_version: bool,
    log_filter: Option<String>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--demo" => config.demo = true,
            "--portable" => config.portable = true,
            "--log" => {
                i += 1;
                if i >= args.len() {
                    return Err("--log requires a filter".into());
                }
                config.log_filter = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Vec<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    if config.show_version {
        println!("reservoir {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    init_logging(config.log_filter.as_deref());

    let mut shell_config = if config.portable {
        ShellConfig::portable()
    } else {
        ShellConfig::default()
    };
    // Context is already established when files or the demo ran first
    if config.demo || !config.files.is_empty() {
        shell_config = shell_config.with_banner(false);
    }

    let mut shell = Shell::new(shell_config)?;

    if config.demo {
        if let Err(e) = shell.run_demo() {
            print_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    }

    for file in &config.files {
        if let Err(e) = shell.run_file(file) {
            print_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    }

    if config.batch_mode || config.demo {
        return Ok(ExitCode::SUCCESS);
    }

    shell.run()?;
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        "\x1b[1mreservoir\x1b[0m - Reservoir registry shell

\x1b[1mUSAGE:\x1b[0m
    reservoir [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Command files to run before starting the shell

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Run files and exit (no shell)
    --demo             Run the built-in walkthrough and exit
    --portable         Write and read portable binary dumps (little-endian, 32-bit lengths)
    --log FILTER       Log filter, e.g. 'debug' (default: RUST_LOG, then 'warn')

\x1b[1mEXAMPLES:\x1b[0m
    reservoir                        Start the interactive shell
    reservoir setup.cmd              Run setup.cmd, then start the shell
    reservoir -b setup.cmd           Run setup.cmd and exit
    reservoir --demo --log info      Run the walkthrough with export logging

\x1b[1mSHELL COMMANDS:\x1b[0m
    add NAME W L D TYPE  Append a reservoir
    remove INDEX         Remove a reservoir (out-of-range is ignored)
    list                 Show all reservoirs
    save-bin PATH        Write a binary dump
    help                 Show every command
    Ctrl+D               Exit the shell"
    );
}
