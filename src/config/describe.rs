//! Human-readable configuration summary.

use crate::config::Config;
use crate::constants::{NOT_CONFIGURED, RULE_WIDTH};

fn or_placeholder(value: Option<&str>) -> &str {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_CONFIGURED)
}

fn enabled(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}

fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<24}{value}", format!("{label}:"))
}

/// Render the configuration summary shown at startup.
///
/// Never fails; unset or empty values render as `not configured`. The
/// Telegram bot token is never included.
pub fn describe(config: &Config) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let project = &config.project;
    let layout = config.layout();
    let notifications = &config.notifications;

    let log_target = if config.logging.save_to_file {
        config.log_file_path().display().to_string()
    } else {
        "stderr only".to_string()
    };

    let base_dir = config
        .paths
        .base_dir
        .as_ref()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| NOT_CONFIGURED.to_string(), |dir| dir.display().to_string());

    let rare_species = if config.alerts.rare_species.is_empty() {
        NOT_CONFIGURED.to_string()
    } else {
        config.alerts.rare_species.join(", ")
    };

    let telegram = match (
        notifications.telegram.bot_token.as_deref(),
        notifications.telegram.chat_id.as_deref(),
    ) {
        (Some(_), Some(chat)) => format!("configured (chat {chat})"),
        _ => NOT_CONFIGURED.to_string(),
    };

    let lines = [
        rule.clone(),
        format!(
            "{} v{}",
            or_placeholder(Some(project.name.as_str())),
            or_placeholder(Some(project.version.as_str()))
        ),
        or_placeholder(Some(project.description.as_str())).to_string(),
        rule.clone(),
        row("Base directory", base_dir),
        row("Data directory", layout.data.display()),
        row("Detection model", or_placeholder(Some(config.detection.model.as_str()))),
        row("Detection confidence", config.detection.confidence_threshold),
        row("Overlap threshold", config.detection.iou_threshold),
        row("Audio model", or_placeholder(Some(config.audio.model_url.as_str()))),
        row("Audio confidence", config.audio.confidence_threshold),
        row("Sample rate", format!("{} Hz", config.audio.sample_rate)),
        row(
            "Animal count bounds",
            format!("{} - {}", config.alerts.min_animals, config.alerts.max_animals),
        ),
        row("Rare species", rare_species),
        row("Export format", config.export.format),
        row(
            "Log level",
            format!("{} ({log_target})", config.logging.level),
        ),
        row("GPU", enabled(config.performance.use_gpu)),
        row(
            "Workers / batch size",
            format!(
                "{} / {}",
                config.performance.num_workers, config.performance.batch_size
            ),
        ),
        row("Alert email", or_placeholder(notifications.email.as_deref())),
        row("Telegram bot", telegram),
        rule,
    ];

    lines.join("\n")
}

/// Print the configuration summary to stdout.
#[allow(clippy::print_stdout)]
pub fn print_config(config: &Config) {
    println!("{}", describe(config));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_describe_shows_identity_and_thresholds() {
        let mut config = Config::default();
        config.paths.base_dir = Some(PathBuf::from("/srv/eco"));
        let text = describe(&config);

        assert!(text.starts_with(&"=".repeat(RULE_WIDTH)));
        assert!(text.contains("Ecosystem Monitoring System v"));
        assert!(text.contains("/srv/eco"));
        assert!(text.contains("yolov8n.pt"));
        assert!(text.contains("0.25"));
        assert!(text.contains("GPU:"));
        assert!(text.contains("enabled"));
    }

    #[test]
    fn test_describe_unset_channels_render_placeholder() {
        let text = describe(&Config::default());

        let email = text.lines().find(|l| l.starts_with("Alert email:")).unwrap_or_default();
        assert!(email.ends_with(NOT_CONFIGURED));
        let telegram = text.lines().find(|l| l.starts_with("Telegram bot:")).unwrap_or_default();
        assert!(telegram.ends_with(NOT_CONFIGURED));
        let base = text.lines().find(|l| l.starts_with("Base directory:")).unwrap_or_default();
        assert!(base.ends_with(NOT_CONFIGURED));
    }

    #[cfg(unix)]
    #[test]
    fn test_describe_shows_non_utf8_base_dir() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut config = Config::default();
        config.paths.base_dir = Some(PathBuf::from(OsStr::from_bytes(b"/srv/eco\xff")));

        let text = describe(&config);
        let base = text.lines().find(|l| l.starts_with("Base directory:")).unwrap_or_default();
        assert!(base.contains("/srv/eco"));
        assert!(!base.ends_with(NOT_CONFIGURED));
    }

    #[test]
    fn test_describe_empty_values_render_placeholder() {
        let mut config = Config::default();
        config.project.name = String::new();
        config.notifications.email = Some(String::new());
        config.alerts.rare_species.clear();

        let text = describe(&config);
        assert!(text.contains(&format!("{NOT_CONFIGURED} v")));
        assert!(!text.lines().any(|l| l.trim_end().ends_with(':')));
    }

    #[test]
    fn test_describe_never_prints_bot_token() {
        let mut config = Config::default();
        config.notifications.telegram.bot_token = Some("123456:SECRET".to_string());
        config.notifications.telegram.chat_id = Some("-1001".to_string());

        let text = describe(&config);
        assert!(!text.contains("SECRET"));
        assert!(text.contains("configured (chat -1001)"));
    }
}
