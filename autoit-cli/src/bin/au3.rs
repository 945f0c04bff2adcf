//! Standalone CLI for driving AutoItX3.
//!
//! Every command prints its result as JSON on stdout.  Logging goes to
//! stderr through `env_logger` (`RUST_LOG`, or `-v` for debug).

use std::path::PathBuf;
use std::process::ExitCode;

use autoit_core::autoit::{signatures, AutoIt};
use autoit_core::config::LibraryConfig;
use autoit_core::errors::AutoItError;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "au3", about = "Drive Windows automation through AutoItX3")]
struct Args {
    /// Path to the AutoItX3 DLL (overrides AUTOITX_DLL and AUTOITX_DIR)
    #[arg(long, global = true)]
    dll: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Compact JSON output (no pretty-printing)
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the DLL and resolve every declared export
    Check,
    /// Print every declared export signature
    Signatures,
    /// Print the resolved DLL location
    Config,
    /// Activate a window
    WinActivate {
        title: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Report whether a window exists
    WinExists {
        title: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Print the full title of a window
    WinTitle {
        title: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Move the cursor to screen coordinates
    MouseMove {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        /// 0 (instant) to 100 (slowest)
        #[arg(long)]
        speed: Option<i32>,
    },
    /// Print the cursor position
    MousePos,
    /// Print the clipboard text
    ClipGet,
    /// Replace the clipboard text
    ClipPut { text: String },
    /// Start a program
    Run {
        program: String,
        /// Working directory
        #[arg(long, default_value = "")]
        dir: String,
        /// Wait for the program to exit and report its exit code
        #[arg(long)]
        wait: bool,
    },
    /// Sleep inside the DLL
    Sleep { millis: i32 },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn to_json<T: Serialize>(value: T) -> Result<Value, AutoItError> {
    serde_json::to_value(value).map_err(|e| AutoItError::Marshal(e.to_string()))
}

/// Load, run `f`, unload.
fn with_autoit<T, F>(config: LibraryConfig, f: F) -> Result<Value, AutoItError>
where
    T: Serialize,
    F: FnOnce(&mut AutoIt) -> Result<T, AutoItError>,
{
    let mut au3 = AutoIt::with_config(config);
    au3.load()?;
    let result = f(&mut au3);
    au3.unload();
    to_json(result?)
}

/// Resolve every export; the report's `ok` is false if any is missing.
fn check(config: LibraryConfig) -> Result<Value, AutoItError> {
    let path = config.path.clone();
    let mut au3 = AutoIt::with_config(config);
    au3.load()?;

    let mut missing = Vec::new();
    for sig in signatures::ALL {
        if let Err(err) = au3.library_mut().resolve(sig) {
            log::warn!("{err}");
            missing.push(sig.name);
        }
    }
    let resolved = au3.library().cached_bindings().len();
    au3.unload();

    Ok(json!({
        "ok": missing.is_empty(),
        "library": path.display().to_string(),
        "declared": signatures::ALL.len(),
        "resolved": resolved,
        "missing": missing,
    }))
}

fn run(command: Command, config: LibraryConfig) -> Result<Value, AutoItError> {
    match command {
        Command::Check => check(config),
        Command::Signatures => to_json(signatures::ALL),
        Command::Config => to_json(config),
        Command::WinActivate { title, text } => with_autoit(config, |au3| au3.win_activate(&title, &text)),
        Command::WinExists { title, text } => with_autoit(config, |au3| au3.win_exists(&title, &text)),
        Command::WinTitle { title, text } => with_autoit(config, |au3| au3.win_get_title(&title, &text)),
        Command::MouseMove { x, y, speed } => with_autoit(config, |au3| au3.mouse_move(x, y, speed)),
        Command::MousePos => with_autoit(config, |au3| au3.mouse_get_pos()),
        Command::ClipGet => with_autoit(config, |au3| au3.clip_get()),
        Command::ClipPut { text } => with_autoit(config, |au3| au3.clip_put(&text)),
        Command::Run { program, dir, wait } => with_autoit(config, |au3| {
            if wait {
                Ok(json!({ "exit_code": au3.run_wait(&program, &dir, None)? }))
            } else {
                Ok(json!({ "pid": au3.run(&program, &dir, None)? }))
            }
        }),
        Command::Sleep { millis } => with_autoit(config, |au3| au3.sleep(millis)),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match args.dll {
        Some(path) => LibraryConfig::new(autoit_core::config::AUTOIT_NAME, path),
        None => LibraryConfig::from_env(),
    };
    log::debug!("using {}", config.path.display());

    match run(args.command, config) {
        Ok(value) => {
            let out = if args.compact {
                serde_json::to_string(&value)
            } else {
                serde_json::to_string_pretty(&value)
            };
            match out {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("au3: {e}");
                    return ExitCode::FAILURE;
                }
            }
            if value.get("ok") == Some(&Value::Bool(false)) {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("au3: {e}");
            ExitCode::FAILURE
        }
    }
}
