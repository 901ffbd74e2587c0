//src/config.rs

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Model identifier stamped on every report.
pub const MODEL_ID: &str = "BAIO k-mer RandomForest v1.0";
/// Training-set label stamped on every report.
pub const TRAINING_SET: &str = "RefSeq viral genomes + GRCh38 host fragments";

/// Geometry of a PDF page, in points. `y` grows downwards from the top edge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    /// Cursor position where content starts on every page
    pub margin_top: f32,
    /// Once a row would end below this line a new page starts
    pub content_bottom: f32,
    /// Baseline of the footer line
    pub footer_y: f32,
    pub row_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4 portrait
        Self {
            width: 595.0,
            height: 842.0,
            margin_left: 40.0,
            margin_top: 50.0,
            content_bottom: 780.0,
            footer_y: 815.0,
            row_height: 18.0,
        }
    }
}

/// Report settings. Every field has a default, so a config file only needs the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub model_id: String,
    pub training_set: String,
    pub filename_prefix: String,
    /// Sequence IDs longer than this are truncated in the PDF table
    pub pdf_id_width: usize,
    pub page: PageGeometry,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            model_id: MODEL_ID.to_string(),
            training_set: TRAINING_SET.to_string(),
            filename_prefix: "baio-report".to_string(),
            pdf_id_width: 25,
            page: PageGeometry::default(),
        }
    }
}

impl ReportConfig {
    /// Load overrides from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: ReportConfig = serde_json::from_str(&text)?;
        log::info!("Loaded report config from {}", path.as_ref().display());
        Ok(config)
    }
}
