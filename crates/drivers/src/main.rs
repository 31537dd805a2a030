mod config;
mod logging;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use config::{AppConfig, ConfigError};
use inkpad_adapters::{
    present_canvas, present_export, present_filter_params, Font8x8Rasterizer, ImageCrateDecoder,
    ParallelFilterEngine, PngFileEncoder,
};
use inkpad_application::{
    ApplicationError, ApplyFilterCommand, ExportPngCommand, ImageDecoder, PadSettings,
    SignaturePadService, UploadImageCommand,
};
use tracing::error;

fn main() -> ExitCode {
    logging::init_logging();
    let args: Vec<String> = std::env::args().collect();

    match run(&args, AppConfig::load) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            error!("{msg}");
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

/// Arguments are parsed before the config is read, so a usage mistake is
/// reported as such even when the config file is broken.
fn run(
    args: &[String],
    load_config: impl FnOnce() -> Result<AppConfig, ConfigError>,
) -> Result<(), CommandError> {
    let command = parse_command(args)?;
    let config = load_config().map_err(|error| {
        error!(%error, "configuration rejected");
        CommandError::Runtime(format!("failed to load inkpad config: {error}"))
    })?;
    run_command(Ok(command), &config)
}

fn build_service(
    config: &AppConfig,
    settings: PadSettings,
) -> Result<SignaturePadService, ApplicationError> {
    SignaturePadService::new(
        settings,
        Box::new(ImageCrateDecoder),
        Box::new(PngFileEncoder),
        Box::new(Font8x8Rasterizer),
        Box::new(ParallelFilterEngine::new(config.min_parallel_pixels)),
    )
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Ui,
    Filter { input: PathBuf, output: PathBuf },
    Blank { output: Option<PathBuf> },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn parse_command(args: &[String]) -> Result<Command, CommandError> {
    if args.len() <= 1 {
        return Ok(Command::Ui);
    }

    match args[1].as_str() {
        "ui" => Ok(Command::Ui),
        "filter" => {
            if args.len() < 4 {
                return Err(CommandError::Usage(
                    "filter needs an input and an output path".to_string(),
                ));
            }
            Ok(Command::Filter {
                input: PathBuf::from(&args[2]),
                output: PathBuf::from(&args[3]),
            })
        }
        "blank" => Ok(Command::Blank {
            output: args.get(2).map(PathBuf::from),
        }),
        other => Err(CommandError::Usage(format!("unknown command: {other}"))),
    }
}

fn run_command(
    command: Result<Command, CommandError>,
    config: &AppConfig,
) -> Result<(), CommandError> {
    match command? {
        Command::Ui => {
            let service = build_service(config, config.pad_settings())
                .map_err(|error| CommandError::Runtime(format!("startup failed: {error}")))?;
            ui::launch_window(service).map_err(CommandError::Runtime)
        }
        Command::Filter { input, output } => {
            let source = ImageCrateDecoder
                .decode_rgba(&input)
                .map_err(|error| CommandError::Runtime(format!("filter failed: {error}")))?;
            let settings = PadSettings {
                width: source.width(),
                height: source.height(),
                ..config.pad_settings()
            };
            let mut service = build_service(config, settings)
                .map_err(|error| CommandError::Runtime(format!("filter failed: {error}")))?;
            service
                .upload_image(UploadImageCommand { path: input })
                .and_then(|()| service.apply_filter(ApplyFilterCommand))
                .map_err(|error| CommandError::Runtime(format!("filter failed: {error}")))?;
            let bytes = service
                .export_png(ExportPngCommand {
                    path: output.clone(),
                })
                .map_err(|error| CommandError::Runtime(format!("export failed: {error}")))?;
            println!("{}", present_filter_params(&config.filter));
            println!("{}", present_export(&output, bytes));
            Ok(())
        }
        Command::Blank { output } => {
            let service = build_service(config, config.pad_settings())
                .map_err(|error| CommandError::Runtime(format!("startup failed: {error}")))?;
            let path = output.unwrap_or_else(|| service.settings().export_path.clone());
            let bytes = service
                .export_png(ExportPngCommand { path: path.clone() })
                .map_err(|error| CommandError::Runtime(format!("export failed: {error}")))?;
            println!("{}", present_canvas(service.canvas()));
            println!("{}", present_export(&path, bytes));
            Ok(())
        }
    }
}

fn print_usage() {
    println!("usage:");
    println!("  inkpad ui");
    println!("  inkpad filter <input-image> <output.png>");
    println!("  inkpad blank [output.png]");
}
