//! Notebook export configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for the ZIP export pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExportConfig {
    /// Compression level: 0 stores files uncompressed, 1 to 9 are DEFLATE levels.
    #[serde(default = "default_level")]
    #[validate(range(min = 0, max = 9))]
    pub compression_level: i64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression_level: default_level(),
        }
    }
}

fn default_level() -> i64 {
    6
}
