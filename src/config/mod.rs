//! Configuration loading and management.

mod describe;
mod file;
mod layout;
mod loader;
mod overrides;
mod paths;
mod shared;
mod types;
mod validate;

pub use describe::{describe, print_config};
pub use file::{load_config_file, save_config, save_default_config};
pub use layout::DataLayout;
pub use loader::{LoadOptions, load, resolve};
pub use overrides::Overrides;
pub use paths::{config_dir, config_file_path, default_base_dir};
pub use shared::SharedConfig;
pub use types::{
    AlertConfig, AudioConfig, ClassLabel, Config, DetectionConfig, ExportConfig, ExportFormat,
    ImageFormat, LogLevel, LoggingConfig, NotificationConfig, PathsConfig, PerformanceConfig,
    ProjectConfig, ReportingConfig, Rgb, TelegramConfig, VisualizationConfig,
};
pub use validate::validate_config;
