// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;

use trs2vtt::app_config::{Config, LogLevel};
use trs2vtt::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a TRS transcript to WebVTT (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for trs2vtt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Path to the input TRS file
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Write output to PATH instead of STDOUT
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Add 'Language: LANG' prefix to output
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Add speaker metadata to each line
    #[arg(short, long)]
    speakers: bool,

    /// Preserve noise such as laughter or silence
    #[arg(short, long)]
    noise: bool,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "trs2vtt.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// trs2vtt - Convert a Transcriber TRS file to the WebVTT format
#[derive(Parser, Debug)]
#[command(name = "trs2vtt")]
#[command(version)]
#[command(about = "Convert a TRS transcription file to the WebVTT format")]
#[command(long_about = "trs2vtt reads a Transcriber (TRS) transcription and writes a WebVTT caption track.

EXAMPLES:
    trs2vtt interview.trs                       # Print WebVTT to stdout
    trs2vtt interview.trs -o interview.vtt      # Write to a file
    trs2vtt -l en -s interview.trs              # Language header and speaker names
    trs2vtt -n interview.trs                    # Keep laughter, coughs, silences...
    trs2vtt completions bash > trs2vtt.bash     # Generate bash completions

CONFIGURATION:
    Defaults for language, speakers, noise and log_level can be stored in
    trs2vtt.json (or the file given with --config-path). Command line options
    take precedence over the file.")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the input TRS file
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Write output to PATH instead of STDOUT
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Add 'Language: LANG' prefix to output
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Add speaker metadata to each line
    #[arg(short, long)]
    speakers: bool,

    /// Preserve noise such as laughter or silence
    #[arg(short, long)]
    noise: bool,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "trs2vtt.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Accept every record; the effective level is log::max_level()
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Label and ANSI color for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (label, color) = Self::style_for_level(record.level());

            // stdout carries the captions, logs go to stderr
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, label, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "trs2vtt", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            // Default behavior - top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            run_convert(ConvertArgs {
                input_path,
                output: cli.output,
                language: cli.language,
                speakers: cli.speakers,
                noise: cli.noise,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
        }
    }
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let mut config = Config::load_or_default(&options.config_path)?;
    debug!("Configuration: {:?}", config);

    // Override config with CLI options if provided
    if let Some(language) = &options.language {
        config.language = language.clone();
    }
    config.speakers |= options.speakers;
    config.noise |= options.noise;

    match &options.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.into()),
    }

    let controller = Controller::with_config(config)?;
    controller.run(
        &options.input_path,
        options.output.as_deref(),
        options.force_overwrite,
    )
}
