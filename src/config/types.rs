//! Configuration type definitions.

use crate::constants::{
    alerts, audio, detection, export, layout, logging, performance, project, reporting,
    visualization,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Complete configuration record.
///
/// Built once by [`crate::config::load`] and treated as read-only
/// afterwards; share it by reference or through
/// [`crate::config::SharedConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Project identity.
    pub project: ProjectConfig,

    /// Filesystem layout.
    pub paths: PathsConfig,

    /// Video object detection parameters.
    pub detection: DetectionConfig,

    /// Audio classification parameters.
    pub audio: AudioConfig,

    /// Alert policy.
    pub alerts: AlertConfig,

    /// Plot and bounding box rendering.
    pub visualization: VisualizationConfig,

    /// Result export settings.
    pub export: ExportConfig,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Performance settings.
    pub performance: PerformanceConfig,

    /// Report rendering settings.
    pub reporting: ReportingConfig,

    /// Notification channels.
    pub notifications: NotificationConfig,
}

/// Project identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name.
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Project description.
    pub description: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: project::NAME.to_string(),
            version: project::VERSION.to_string(),
            description: project::DESCRIPTION.to_string(),
        }
    }
}

/// Filesystem layout.
///
/// Videos, audio, images and results live under the data directory; the
/// data and model directories live under the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Base directory. Unset means the platform data directory.
    pub base_dir: Option<PathBuf>,
    /// Data root.
    pub data_dir: PathBuf,
    /// Video input directory.
    pub videos_dir: PathBuf,
    /// Audio input directory.
    pub audio_dir: PathBuf,
    /// Image directory.
    pub images_dir: PathBuf,
    /// Results directory.
    pub results_dir: PathBuf,
    /// Model directory.
    pub models_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            data_dir: PathBuf::from(layout::DATA),
            videos_dir: PathBuf::from(layout::VIDEOS),
            audio_dir: PathBuf::from(layout::AUDIO),
            images_dir: PathBuf::from(layout::IMAGES),
            results_dir: PathBuf::from(layout::RESULTS),
            models_dir: PathBuf::from(layout::MODELS),
        }
    }
}

/// A detector class id and its species label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassLabel {
    /// Numeric class id reported by the detector.
    pub id: u32,
    /// Species label.
    pub label: String,
}

/// Video object detection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Model identifier.
    pub model: String,
    /// Minimum confidence to accept a detection.
    pub confidence_threshold: f32,
    /// Maximum box overlap before duplicates are suppressed.
    pub iou_threshold: f32,
    /// Classes of interest.
    pub classes: Vec<ClassLabel>,
    /// Process every N-th frame.
    pub frame_sample_interval: u32,
    /// Frame scale factor.
    pub resize_factor: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            model: detection::MODEL.to_string(),
            confidence_threshold: detection::CONFIDENCE_THRESHOLD,
            iou_threshold: detection::IOU_THRESHOLD,
            classes: detection::CLASSES
                .iter()
                .map(|&(id, label)| ClassLabel {
                    id,
                    label: label.to_string(),
                })
                .collect(),
            frame_sample_interval: detection::FRAME_SAMPLE_INTERVAL,
            resize_factor: detection::RESIZE_FACTOR,
        }
    }
}

impl DetectionConfig {
    /// Species label for a detector class id, if it is a class of interest.
    pub fn label_for(&self, id: u32) -> Option<&str> {
        self.classes
            .iter()
            .find(|class| class.id == id)
            .map(|class| class.label.as_str())
    }
}

/// Audio classification parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    /// Model source identifier.
    pub model_url: String,
    /// Input sample rate in Hz.
    pub sample_rate: u32,
    /// Minimum confidence to accept a classification.
    pub confidence_threshold: f32,
    /// Labels considered nature sounds.
    pub nature_sound_classes: Vec<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            model_url: audio::MODEL_URL.to_string(),
            sample_rate: audio::SAMPLE_RATE,
            confidence_threshold: audio::CONFIDENCE_THRESHOLD,
            nature_sound_classes: audio::NATURE_SOUND_CLASSES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl AudioConfig {
    /// Whether a classifier label counts as a nature sound.
    pub fn is_nature_sound(&self, label: &str) -> bool {
        self.nature_sound_classes.iter().any(|c| c == label)
    }
}

/// Alert policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertConfig {
    /// Lower animal count bound.
    pub min_animals: u32,
    /// Upper animal count bound.
    pub max_animals: u32,
    /// Species that always trigger an alert.
    pub rare_species: Vec<String>,
    /// Critical drop, as a fraction of baseline activity.
    pub activity_drop: f32,
    /// Spike, as a multiple of baseline activity.
    pub activity_spike: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            min_animals: alerts::MIN_ANIMALS,
            max_animals: alerts::MAX_ANIMALS,
            rare_species: alerts::RARE_SPECIES
                .iter()
                .map(ToString::to_string)
                .collect(),
            activity_drop: alerts::ACTIVITY_DROP,
            activity_spike: alerts::ACTIVITY_SPIKE,
        }
    }
}

impl AlertConfig {
    /// Whether a species always triggers an alert.
    pub fn is_rare(&self, species: &str) -> bool {
        self.rare_species
            .iter()
            .any(|s| s.eq_ignore_ascii_case(species))
    }
}

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self(r, g, b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Plot and bounding box rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizationConfig {
    /// Figure width in inches.
    pub figure_width: f32,
    /// Figure height in inches.
    pub figure_height: f32,
    /// Figure resolution.
    pub dpi: u32,
    /// Color palette name.
    pub palette: String,
    /// Bounding box colors by species; must contain a `default` entry.
    pub bbox_colors: BTreeMap<String, Rgb>,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            figure_width: visualization::FIGURE_WIDTH,
            figure_height: visualization::FIGURE_HEIGHT,
            dpi: visualization::DPI,
            palette: visualization::PALETTE.to_string(),
            bbox_colors: visualization::BBOX_COLORS
                .iter()
                .map(|&(species, color)| (species.to_string(), Rgb::from(color)))
                .collect(),
        }
    }
}

impl VisualizationConfig {
    /// Bounding box color for a species.
    ///
    /// Unlisted species get the `default` entry.
    pub fn color_for(&self, species: &str) -> Rgb {
        self.bbox_colors
            .get(species)
            .or_else(|| self.bbox_colors.get(visualization::DEFAULT_COLOR_KEY))
            .copied()
            .unwrap_or_else(|| Rgb::from(visualization::FALLBACK_COLOR))
    }
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// JSON document.
    Json,
    /// Excel workbook.
    Excel,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Excel => write!(f, "excel"),
        }
    }
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG.
    #[default]
    Png,
    /// JPEG.
    #[serde(alias = "jpeg")]
    Jpg,
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Jpg => write!(f, "jpg"),
        }
    }
}

/// Result export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Export file format.
    pub format: ExportFormat,
    /// strftime pattern for timestamps in file names.
    pub datetime_format: String,
    /// Persist rendered visualizations.
    pub save_visualizations: bool,
    /// Image file format.
    pub image_format: ImageFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            datetime_format: export::DATETIME_FORMAT.to_string(),
            save_visualizations: true,
            image_format: ImageFormat::Png,
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug and above.
    #[serde(alias = "DEBUG")]
    Debug,
    /// Info and above.
    #[default]
    #[serde(alias = "INFO")]
    Info,
    /// Warnings and errors.
    #[serde(alias = "WARNING", alias = "warn")]
    #[value(alias = "warn")]
    Warning,
    /// Errors only.
    #[serde(alias = "ERROR")]
    Error,
}

impl LogLevel {
    /// Equivalent `tracing` filter directive.
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log verbosity.
    pub level: LogLevel,
    /// Also write logs to a file.
    pub save_to_file: bool,
    /// Log file; relative paths are under the base directory.
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            save_to_file: true,
            file: PathBuf::from(logging::FILE_NAME),
        }
    }
}

/// Performance settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Prefer GPU inference when available. Advisory only.
    pub use_gpu: bool,
    /// Inference batch size.
    pub batch_size: usize,
    /// Worker thread count.
    pub num_workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            use_gpu: true,
            batch_size: performance::BATCH_SIZE,
            num_workers: performance::NUM_WORKERS,
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportingConfig {
    /// `UTC` or a fixed offset such as `+03:00`.
    pub timezone: String,
    /// Report language code.
    pub language: String,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            timezone: reporting::TIMEZONE.to_string(),
            language: reporting::LANGUAGE.to_string(),
        }
    }
}

impl ReportingConfig {
    /// Parse the timezone into a fixed UTC offset.
    pub fn utc_offset(&self) -> Option<chrono::FixedOffset> {
        if self.timezone.eq_ignore_ascii_case("utc") || self.timezone == "Z" {
            return chrono::FixedOffset::east_opt(0);
        }
        self.timezone.parse().ok()
    }
}

/// Telegram bot credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot token.
    pub bot_token: Option<String>,
    /// Target chat id.
    pub chat_id: Option<String>,
}

/// Notification channels. Unset values disable the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    /// Alert email recipient.
    pub email: Option<String>,
    /// Telegram bot channel.
    pub telegram: TelegramConfig,
}

impl NotificationConfig {
    /// Whether email alerts are enabled.
    pub fn email_enabled(&self) -> bool {
        self.email.is_some()
    }

    /// Whether Telegram alerts are enabled.
    pub fn telegram_enabled(&self) -> bool {
        self.telegram.bot_token.is_some() && self.telegram.chat_id.is_some()
    }
}
