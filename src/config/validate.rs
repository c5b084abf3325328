//! Configuration validation.

use crate::config::Config;
use crate::constants::{confidence, visualization::DEFAULT_COLOR_KEY};
use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use std::collections::HashSet;
use std::path::{Component, Path};
use tracing::warn;

/// Validate the entire configuration.
///
/// Returns the first violation found, naming the offending field.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_project(config)?;
    validate_paths(config)?;
    validate_detection(config)?;
    validate_audio(config)?;
    validate_alerts(config)?;
    validate_visualization(config)?;
    validate_export(config)?;
    validate_performance(config)?;
    validate_reporting(config)?;
    validate_notifications(config)?;
    Ok(())
}

fn check_probability(field: &str, value: f32) -> Result<()> {
    if !(confidence::MIN..=confidence::MAX).contains(&value) {
        return Err(Error::invalid(
            field,
            format!(
                "must be between {} and {}, got {value}",
                confidence::MIN,
                confidence::MAX
            ),
        ));
    }
    Ok(())
}

fn check_positive_ratio(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::invalid(
            field,
            format!("must be a positive number, got {value}"),
        ));
    }
    Ok(())
}

fn check_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn check_labels(field: &str, labels: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for label in labels {
        check_not_blank(field, label)?;
        if !seen.insert(label.as_str()) {
            return Err(Error::invalid(field, format!("duplicate entry '{label}'")));
        }
    }
    Ok(())
}

fn validate_project(config: &Config) -> Result<()> {
    let project = &config.project;
    check_not_blank("project.name", &project.name)?;

    if let Err(e) = semver::Version::parse(&project.version) {
        return Err(Error::invalid(
            "project.version",
            format!("'{}' is not a semantic version: {e}", project.version),
        ));
    }

    Ok(())
}

fn validate_paths(config: &Config) -> Result<()> {
    let paths = &config.paths;

    if let Some(base) = &paths.base_dir
        && base.as_os_str().is_empty()
    {
        return Err(Error::invalid("paths.base_dir", "must not be empty"));
    }

    let subdirs: [(&str, &Path); 6] = [
        ("paths.data_dir", paths.data_dir.as_path()),
        ("paths.videos_dir", paths.videos_dir.as_path()),
        ("paths.audio_dir", paths.audio_dir.as_path()),
        ("paths.images_dir", paths.images_dir.as_path()),
        ("paths.results_dir", paths.results_dir.as_path()),
        ("paths.models_dir", paths.models_dir.as_path()),
    ];

    for (field, dir) in subdirs {
        if dir.as_os_str().is_empty() {
            return Err(Error::invalid(field, "must not be empty"));
        }
        if !dir.is_relative() {
            return Err(Error::invalid(
                field,
                format!("must be relative to the base directory, got {}", dir.display()),
            ));
        }
        if dir.components().any(|c| c == Component::ParentDir) {
            return Err(Error::invalid(
                field,
                format!("must stay inside the base directory, got {}", dir.display()),
            ));
        }
    }

    Ok(())
}

fn validate_detection(config: &Config) -> Result<()> {
    let detection = &config.detection;

    check_not_blank("detection.model", &detection.model)?;
    check_probability("detection.confidence_threshold", detection.confidence_threshold)?;
    check_probability("detection.iou_threshold", detection.iou_threshold)?;

    if detection.frame_sample_interval == 0 {
        return Err(Error::invalid(
            "detection.frame_sample_interval",
            "must be at least 1",
        ));
    }

    check_positive_ratio("detection.resize_factor", detection.resize_factor)?;

    let mut ids = HashSet::new();
    for class in &detection.classes {
        if !ids.insert(class.id) {
            return Err(Error::invalid(
                "detection.classes",
                format!("duplicate class id {}", class.id),
            ));
        }
        check_not_blank("detection.classes", &class.label)?;
    }

    Ok(())
}

fn validate_audio(config: &Config) -> Result<()> {
    let audio = &config.audio;

    check_not_blank("audio.model_url", &audio.model_url)?;

    if audio.sample_rate == 0 {
        return Err(Error::invalid("audio.sample_rate", "must be a positive number of Hz"));
    }

    check_probability("audio.confidence_threshold", audio.confidence_threshold)?;
    check_labels("audio.nature_sound_classes", &audio.nature_sound_classes)?;

    Ok(())
}

fn validate_alerts(config: &Config) -> Result<()> {
    let alerts = &config.alerts;

    if alerts.min_animals > alerts.max_animals {
        return Err(Error::invalid(
            "alerts.min_animals",
            format!(
                "must not exceed alerts.max_animals ({} > {})",
                alerts.min_animals, alerts.max_animals
            ),
        ));
    }

    check_labels("alerts.rare_species", &alerts.rare_species)?;
    check_positive_ratio("alerts.activity_drop", alerts.activity_drop)?;
    check_positive_ratio("alerts.activity_spike", alerts.activity_spike)?;

    if alerts.activity_drop >= 1.0 {
        warn!(
            activity_drop = alerts.activity_drop,
            "activity drop ratio is not below baseline; every reading will count as a drop"
        );
    }
    if alerts.activity_spike <= 1.0 {
        warn!(
            activity_spike = alerts.activity_spike,
            "activity spike ratio is not above baseline; every reading will count as a spike"
        );
    }

    Ok(())
}

fn validate_visualization(config: &Config) -> Result<()> {
    let viz = &config.visualization;

    check_positive_ratio("visualization.figure_width", viz.figure_width)?;
    check_positive_ratio("visualization.figure_height", viz.figure_height)?;

    if viz.dpi == 0 {
        return Err(Error::invalid("visualization.dpi", "must be at least 1"));
    }

    check_not_blank("visualization.palette", &viz.palette)?;

    if !viz.bbox_colors.contains_key(DEFAULT_COLOR_KEY) {
        return Err(Error::invalid(
            "visualization.bbox_colors",
            format!("must contain a '{DEFAULT_COLOR_KEY}' entry"),
        ));
    }

    Ok(())
}

fn validate_export(config: &Config) -> Result<()> {
    let format = &config.export.datetime_format;

    check_not_blank("export.datetime_format", format)?;

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::invalid(
            "export.datetime_format",
            format!("'{format}' is not a valid strftime pattern"),
        ));
    }

    Ok(())
}

fn validate_performance(config: &Config) -> Result<()> {
    let performance = &config.performance;

    if performance.batch_size == 0 {
        return Err(Error::invalid("performance.batch_size", "must be at least 1"));
    }

    if performance.num_workers == 0 {
        return Err(Error::invalid("performance.num_workers", "must be at least 1"));
    }

    Ok(())
}

fn validate_reporting(config: &Config) -> Result<()> {
    let reporting = &config.reporting;

    if reporting.utc_offset().is_none() {
        return Err(Error::invalid(
            "reporting.timezone",
            format!(
                "expected UTC or a fixed offset like +03:00, got '{}'",
                reporting.timezone
            ),
        ));
    }

    let language = &reporting.language;
    if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::invalid(
            "reporting.language",
            format!("expected a 2 or 3 letter language code, got '{language}'"),
        ));
    }

    Ok(())
}

fn validate_notifications(config: &Config) -> Result<()> {
    let notifications = &config.notifications;

    if let Some(email) = &notifications.email {
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid || email.contains(char::is_whitespace) {
            return Err(Error::invalid(
                "notifications.email",
                format!("'{email}' is not an email address"),
            ));
        }
    }

    let telegram = &notifications.telegram;
    match (&telegram.bot_token, &telegram.chat_id) {
        (Some(_), None) => {
            return Err(Error::invalid(
                "notifications.telegram.chat_id",
                "must be set when a bot token is configured",
            ));
        }
        (None, Some(_)) => {
            return Err(Error::invalid(
                "notifications.telegram.bot_token",
                "must be set when a chat id is configured",
            ));
        }
        (Some(token), Some(chat_id)) => {
            check_not_blank("notifications.telegram.bot_token", token)?;
            check_not_blank("notifications.telegram.chat_id", chat_id)?;
        }
        (None, None) => {}
    }

    Ok(())
}
