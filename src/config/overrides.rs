//! Explicit overrides layered over file values.

use crate::config::{Config, ExportFormat, ImageFormat, LogLevel};
use std::path::PathBuf;

/// Values that replace whatever the configuration file says.
///
/// Built from command-line flags and their `ECOWATCH_*` environment
/// variables; `None` leaves the file value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// `paths.base_dir`
    pub base_dir: Option<PathBuf>,
    /// `detection.model`
    pub detection_model: Option<String>,
    /// `detection.confidence_threshold`
    pub detection_confidence: Option<f32>,
    /// `detection.iou_threshold`
    pub iou_threshold: Option<f32>,
    /// `audio.confidence_threshold`
    pub audio_confidence: Option<f32>,
    /// `export.format`
    pub export_format: Option<ExportFormat>,
    /// `export.image_format`
    pub image_format: Option<ImageFormat>,
    /// `logging.level`
    pub log_level: Option<LogLevel>,
    /// `logging.file`
    pub log_file: Option<PathBuf>,
    /// `logging.save_to_file`
    pub save_logs: Option<bool>,
    /// `performance.use_gpu`
    pub use_gpu: Option<bool>,
    /// `performance.batch_size`
    pub batch_size: Option<usize>,
    /// `performance.num_workers`
    pub num_workers: Option<usize>,
    /// `reporting.timezone`
    pub timezone: Option<String>,
    /// `reporting.language`
    pub language: Option<String>,
    /// `notifications.email`
    pub alert_email: Option<String>,
    /// `notifications.telegram.bot_token`
    pub telegram_bot_token: Option<String>,
    /// `notifications.telegram.chat_id`
    pub telegram_chat_id: Option<String>,
}

macro_rules! apply_field {
    ($applied:ident, $source:expr, $target:expr, $name:literal) => {
        if let Some(value) = $source {
            $target = value;
            $applied.push($name);
        }
    };
}

impl Overrides {
    /// Apply every set override to `config`.
    ///
    /// Returns the dotted names of the fields that were replaced.
    pub fn apply(self, config: &mut Config) -> Vec<&'static str> {
        let mut applied = Vec::new();

        apply_field!(applied, self.base_dir.map(Some), config.paths.base_dir, "paths.base_dir");
        apply_field!(applied, self.detection_model, config.detection.model, "detection.model");
        apply_field!(
            applied,
            self.detection_confidence,
            config.detection.confidence_threshold,
            "detection.confidence_threshold"
        );
        apply_field!(
            applied,
            self.iou_threshold,
            config.detection.iou_threshold,
            "detection.iou_threshold"
        );
        apply_field!(
            applied,
            self.audio_confidence,
            config.audio.confidence_threshold,
            "audio.confidence_threshold"
        );
        apply_field!(applied, self.export_format, config.export.format, "export.format");
        apply_field!(
            applied,
            self.image_format,
            config.export.image_format,
            "export.image_format"
        );
        apply_field!(applied, self.log_level, config.logging.level, "logging.level");
        apply_field!(applied, self.log_file, config.logging.file, "logging.file");
        apply_field!(
            applied,
            self.save_logs,
            config.logging.save_to_file,
            "logging.save_to_file"
        );
        apply_field!(applied, self.use_gpu, config.performance.use_gpu, "performance.use_gpu");
        apply_field!(
            applied,
            self.batch_size,
            config.performance.batch_size,
            "performance.batch_size"
        );
        apply_field!(
            applied,
            self.num_workers,
            config.performance.num_workers,
            "performance.num_workers"
        );
        apply_field!(applied, self.timezone, config.reporting.timezone, "reporting.timezone");
        apply_field!(applied, self.language, config.reporting.language, "reporting.language");
        apply_field!(
            applied,
            self.alert_email.map(Some),
            config.notifications.email,
            "notifications.email"
        );
        apply_field!(
            applied,
            self.telegram_bot_token.map(Some),
            config.notifications.telegram.bot_token,
            "notifications.telegram.bot_token"
        );
        apply_field!(
            applied,
            self.telegram_chat_id.map(Some),
            config.notifications.telegram.chat_id,
            "notifications.telegram.chat_id"
        );

        applied
    }
}
