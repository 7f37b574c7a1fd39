// SPDX-License-Identifier: MPL-2.0
use muwi_scan::app::{prepare_directories, Controller};
use muwi_scan::application::FileSlotAllocator;
use muwi_scan::config::{self, Config};
use muwi_scan::error::Result;
use muwi_scan::infrastructure::{
    read_artist, ImageImportDevice, LittleExifWriter, LoggingMediaIndex,
};
use muwi_scan::paths;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
muwi-scan - catalog-coded object photography

USAGE:
  muwi-scan [OPTIONS] <COMMAND>

COMMANDS:
  capture --source <FILE> [--code <CODE>] [--artist <NAME>] [--angle <DEG>]
                 Import FILE as a new capture for CODE
  next-slot [--code <CODE>]
                 Print the file the next capture for CODE would use
  inspect <FILE> Print the EXIF artist of FILE

OPTIONS:
  --config <FILE>     Settings file (default: platform config dir)
  --photo-dir <DIR>   Directory finished captures are placed in
  --cache-dir <DIR>   Directory raw exposures are staged in
  -h, --help          Print this help
";

enum Command {
    Capture {
        source: PathBuf,
        code: Option<String>,
        artist: Option<String>,
        angle: Option<i32>,
    },
    NextSlot {
        code: Option<String>,
    },
    Inspect {
        path: PathBuf,
    },
}

struct Cli {
    config: Option<PathBuf>,
    photo_dir: Option<String>,
    cache_dir: Option<String>,
    command: Command,
}

fn parse_cli(mut args: pico_args::Arguments) -> std::result::Result<Cli, String> {
    let config = args
        .opt_value_from_str("--config")
        .map_err(|e| e.to_string())?;
    let photo_dir = args
        .opt_value_from_str("--photo-dir")
        .map_err(|e| e.to_string())?;
    let cache_dir = args
        .opt_value_from_str("--cache-dir")
        .map_err(|e| e.to_string())?;

    let command = match args.subcommand().map_err(|e| e.to_string())?.as_deref() {
        Some("capture") => Command::Capture {
            source: args
                .value_from_str("--source")
                .map_err(|e| e.to_string())?,
            code: args.opt_value_from_str("--code").map_err(|e| e.to_string())?,
            artist: args
                .opt_value_from_str("--artist")
                .map_err(|e| e.to_string())?,
            angle: args
                .opt_value_from_str("--angle")
                .map_err(|e| e.to_string())?,
        },
        Some("next-slot") => Command::NextSlot {
            code: args.opt_value_from_str("--code").map_err(|e| e.to_string())?,
        },
        Some("inspect") => Command::Inspect {
            path: args.free_from_str().map_err(|e| e.to_string())?,
        },
        Some(other) => return Err(format!("unknown command '{other}'")),
        None => return Err("missing command".to_string()),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(format!("unexpected arguments: {rest:?}"));
    }

    Ok(Cli {
        config,
        photo_dir,
        cache_dir,
        command,
    })
}

/// Log level comes from `RUST_LOG`; defaults to info, debug for this crate.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,muwi_scan=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    // command line beats the settings file
    if let Some(dir) = &cli.photo_dir {
        config.photo_dir = Some(PathBuf::from(dir));
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = Some(PathBuf::from(dir));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    paths::init_cli_overrides(cli.photo_dir.clone(), cli.cache_dir.clone());
    let config = load_config(&cli)?;

    match cli.command {
        Command::Capture {
            source,
            code,
            artist,
            angle,
        } => {
            let controller = Controller::start(
                &config,
                ImageImportDevice::new(source),
                Arc::new(LittleExifWriter::new()),
                Arc::new(LoggingMediaIndex),
            )?;
            if let Some(code) = code {
                controller.set_code(code);
            }
            if let Some(artist) = artist {
                controller.set_artist(artist);
            }
            if let Some(angle) = angle {
                controller.on_orientation_sample(angle);
            }

            let photo = controller.trigger_capture()?.wait()?;
            println!("{}", photo.path.display());
        }
        Command::NextSlot { code } => {
            let settings = prepare_directories(&config)?;
            let code = code.unwrap_or_else(|| config.initial_entry().code);
            let slot = FileSlotAllocator::new(settings.photo_dir).next_slot(&code)?;
            println!("{}", slot.path().display());
        }
        Command::Inspect { path } => match read_artist(&path)? {
            Some(artist) => println!("{artist}"),
            None => println!("(no artist)"),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    init_tracing();

    let cli = match parse_cli(args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("error: {message}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
