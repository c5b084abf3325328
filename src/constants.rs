//! Application-wide constants.
//!
//! All default values and bounds live here so the configuration types,
//! validation and rendering agree on them.

/// Application name used for platform directories and user-facing messages.
pub const APP_NAME: &str = "ecowatch";

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Stand-in for secrets in serialized output.
pub const REDACTED: &str = "<redacted>";

/// Placeholder rendered for settings that are unset or empty.
pub const NOT_CONFIGURED: &str = "not configured";

/// Width of the ruler lines printed around the configuration summary.
pub const RULE_WIDTH: usize = 60;

/// Project identity defaults.
pub mod project {
    /// Human-readable project name.
    pub const NAME: &str = "Ecosystem Monitoring System";
    /// Version reported by the configuration record.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    /// One-line project description.
    pub const DESCRIPTION: &str = "Ecosystem monitoring with machine learning";
}

/// Directory names of the data layout.
pub mod layout {
    /// Data root, relative to the base directory.
    pub const DATA: &str = "data";
    /// Video input, relative to the data root.
    pub const VIDEOS: &str = "videos";
    /// Audio input, relative to the data root.
    pub const AUDIO: &str = "audio";
    /// Extracted frames and rendered figures, relative to the data root.
    pub const IMAGES: &str = "images";
    /// Analysis results, relative to the data root.
    pub const RESULTS: &str = "results";
    /// Model weights, relative to the base directory.
    pub const MODELS: &str = "models";
}

/// Probability bounds shared by every threshold field.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
}

/// Video object detection defaults.
pub mod detection {
    /// Detection model weights (nano variant for speed).
    pub const MODEL: &str = "yolov8n.pt";
    /// Minimum detection confidence.
    pub const CONFIDENCE_THRESHOLD: f32 = 0.25;
    /// IoU threshold for non-maximum suppression.
    pub const IOU_THRESHOLD: f32 = 0.45;
    /// Process every N-th frame.
    pub const FRAME_SAMPLE_INTERVAL: u32 = 2;
    /// Frame scale factor (1.0 keeps the original size).
    pub const RESIZE_FACTOR: f32 = 1.0;
    /// COCO class ids mapped to the animal labels of interest.
    pub const CLASSES: &[(u32, &str)] = &[
        (14, "bird"),
        (15, "cat"),
        (16, "dog"),
        (17, "horse"),
        (18, "sheep"),
        (19, "cow"),
        (20, "elephant"),
        (21, "bear"),
        (22, "zebra"),
        (23, "giraffe"),
    ];
}

/// Audio event classification defaults.
pub mod audio {
    /// Audio classifier model source.
    pub const MODEL_URL: &str = "https://tfhub.dev/google/yamnet/1";
    /// Sample rate expected by the classifier, in Hz.
    pub const SAMPLE_RATE: u32 = 16_000;
    /// Minimum classification confidence.
    pub const CONFIDENCE_THRESHOLD: f32 = 0.3;
    /// Labels treated as nature sounds.
    pub const NATURE_SOUND_CLASSES: &[&str] = &[
        "Bird",
        "Bird vocalization",
        "Bird flight",
        "Chirp",
        "Tweet",
        "Squawk",
        "Animal",
        "Domestic animals",
        "Wild animals",
        "Insect",
        "Cricket",
        "Frog",
        "Wind",
        "Rain",
        "Stream",
        "Ocean",
        "Thunder",
    ];
}

/// Alert policy defaults.
pub mod alerts {
    /// Animal count at or below which an alert is raised.
    pub const MIN_ANIMALS: u32 = 10;
    /// Animal count at or above which an alert is raised.
    pub const MAX_ANIMALS: u32 = 100;
    /// Species that always raise an alert.
    pub const RARE_SPECIES: &[&str] = &["bear", "elephant", "giraffe", "zebra"];
    /// Activity below this fraction of the baseline is a critical drop.
    pub const ACTIVITY_DROP: f32 = 0.5;
    /// Activity above this multiple of the baseline is a spike.
    pub const ACTIVITY_SPIKE: f32 = 2.0;
}

/// Visualization defaults.
pub mod visualization {
    /// Figure width in inches.
    pub const FIGURE_WIDTH: f32 = 15.0;
    /// Figure height in inches.
    pub const FIGURE_HEIGHT: f32 = 8.0;
    /// Figure resolution.
    pub const DPI: u32 = 100;
    /// Color palette name.
    pub const PALETTE: &str = "viridis";
    /// Key of the fallback entry in the bounding box color map.
    pub const DEFAULT_COLOR_KEY: &str = "default";
    /// Bounding box colors by species.
    pub const BBOX_COLORS: &[(&str, (u8, u8, u8))] = &[
        ("bird", (0, 255, 0)),
        ("bear", (255, 0, 0)),
        ("deer", (0, 255, 255)),
        (DEFAULT_COLOR_KEY, FALLBACK_COLOR),
    ];
    /// Color used when the map has no `default` entry at all.
    pub const FALLBACK_COLOR: (u8, u8, u8) = (255, 255, 0);
}

/// Export defaults.
pub mod export {
    /// Timestamp format used in exported file names.
    pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
}

/// Logging defaults.
pub mod logging {
    /// Log file name, relative to the base directory.
    pub const FILE_NAME: &str = "ecowatch.log";
}

/// Performance defaults.
pub mod performance {
    /// Inference batch size.
    pub const BATCH_SIZE: usize = 16;
    /// Worker thread count.
    pub const NUM_WORKERS: usize = 4;
}

/// Report defaults.
pub mod reporting {
    /// Timezone used when rendering report timestamps.
    pub const TIMEZONE: &str = "UTC";
    /// Report language code.
    pub const LANGUAGE: &str = "en";
}
