//! CLI argument definitions.

use super::validators::parse_confidence;
use crate::config::{ExportFormat, ImageFormat, LogLevel, Overrides};
use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Configuration provider for the ecosystem monitoring system.
#[derive(Debug, Parser)]
#[command(name = "ecowatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: show).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "ECOWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Per-setting overrides.
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Available subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Load the configuration and print a summary.
    Show,
    /// Load the configuration and report whether it is usable.
    Check,
    /// Print the full effective configuration.
    Dump {
        /// Output format.
        #[arg(long, value_enum, default_value_t = DumpFormat::Toml)]
        format: DumpFormat,
    },
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path.
    Path,
}

/// Serialization used by `dump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// TOML, the configuration file format.
    Toml,
    /// Pretty-printed JSON.
    Json,
}

/// Overrides for individual settings.
///
/// Each flag falls back to its environment variable, and both beat the
/// configuration file.
#[derive(Debug, Args)]
pub struct OverrideArgs {
    /// Base directory for data, models and logs.
    #[arg(long, global = true, env = "ECOWATCH_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Detection model identifier.
    #[arg(long, global = true, env = "ECOWATCH_DETECTION_MODEL")]
    pub detection_model: Option<String>,

    /// Detection confidence threshold (0.0-1.0).
    #[arg(long, global = true, value_parser = parse_confidence, env = "ECOWATCH_DETECTION_CONFIDENCE")]
    pub detection_confidence: Option<f32>,

    /// Overlap-suppression (IoU) threshold (0.0-1.0).
    #[arg(long, global = true, value_parser = parse_confidence, env = "ECOWATCH_IOU_THRESHOLD")]
    pub iou_threshold: Option<f32>,

    /// Audio classification confidence threshold (0.0-1.0).
    #[arg(long, global = true, value_parser = parse_confidence, env = "ECOWATCH_AUDIO_CONFIDENCE")]
    pub audio_confidence: Option<f32>,

    /// Export file format.
    #[arg(long, global = true, value_enum, env = "ECOWATCH_EXPORT_FORMAT")]
    pub export_format: Option<ExportFormat>,

    /// Image file format.
    #[arg(long, global = true, value_enum, env = "ECOWATCH_IMAGE_FORMAT")]
    pub image_format: Option<ImageFormat>,

    /// Log level.
    #[arg(long, global = true, value_enum, ignore_case = true, env = "ECOWATCH_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Log file (relative paths are under the base directory).
    #[arg(long, global = true, env = "ECOWATCH_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Also write logs to the log file (true/false).
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        env = "ECOWATCH_SAVE_LOGS"
    )]
    pub save_logs: Option<bool>,

    /// Prefer GPU inference (true/false).
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        env = "ECOWATCH_USE_GPU"
    )]
    pub use_gpu: Option<bool>,

    /// Inference batch size.
    #[arg(long, global = true, env = "ECOWATCH_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Worker thread count.
    #[arg(long, global = true, env = "ECOWATCH_WORKERS")]
    pub workers: Option<usize>,

    /// Report timezone (UTC or a fixed offset like +03:00).
    #[arg(long, global = true, env = "ECOWATCH_TIMEZONE")]
    pub timezone: Option<String>,

    /// Report language code.
    #[arg(long, global = true, env = "ECOWATCH_LANGUAGE")]
    pub language: Option<String>,

    /// Alert email recipient.
    #[arg(long, global = true, env = "ECOWATCH_ALERT_EMAIL")]
    pub alert_email: Option<String>,

    /// Telegram bot token.
    #[arg(long, global = true, env = "ECOWATCH_TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    /// Telegram chat id.
    #[arg(long, global = true, env = "ECOWATCH_TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,
}

impl From<OverrideArgs> for Overrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            base_dir: args.base_dir,
            detection_model: args.detection_model,
            detection_confidence: args.detection_confidence,
            iou_threshold: args.iou_threshold,
            audio_confidence: args.audio_confidence,
            export_format: args.export_format,
            image_format: args.image_format,
            log_level: args.log_level,
            log_file: args.log_file,
            save_logs: args.save_logs,
            use_gpu: args.use_gpu,
            batch_size: args.batch_size,
            num_workers: args.workers,
            timezone: args.timezone,
            language: args.language,
            alert_email: args.alert_email,
            telegram_bot_token: args.telegram_bot_token,
            telegram_chat_id: args.telegram_chat_id,
        }
    }
}
