//! Export and batch settings, loadable from YAML or JSON files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::partition::PartitionConfig;

/// Per-document settings shared by every area element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Acquisition raster pitch, written as `"pitch,pitch"`.
    pub raster_pitch: f64,
    /// Instrument method file name.
    pub method: String,
    /// Area names are this prefix followed by the 1-based area number.
    pub name_prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            raster_pitch: 100.0,
            method: "mymethod.par".to_string(),
            name_prefix: "myroi_".to_string(),
        }
    }
}

/// Settings for splitting an ROI set into per-group files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub group_count: usize,
    /// Random seed for reproducibility (None for random).
    pub seed: Option<u64>,
    /// Group `i` is written to `<base_name>_<i>.csv` / `.xml`.
    pub base_name: String,
    /// Areas in group `i` are named `<roi_name>_split<i>_<j>`.
    pub roi_name: String,
    pub raster_pitch: f64,
    pub method: String,
    /// Directory for the group files; the working directory when unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            group_count: 4,
            seed: None,
            base_name: "base".to_string(),
            roi_name: "roi".to_string(),
            raster_pitch: 20.0,
            method: "par".to_string(),
            output_dir: None,
        }
    }
}

impl BatchConfig {
    /// Loads a config file; the format follows the extension (`.yaml`,
    /// `.yml` or `.json`). Missing fields take their defaults.
    pub fn from_file(path: &str) -> Result<Self> {
        Ok(common::deserialize_file(path)?)
    }

    pub fn partition_config(&self) -> PartitionConfig {
        PartitionConfig {
            group_count: self.group_count,
            seed: self.seed,
        }
    }

    pub fn export_settings(&self, group: usize) -> ExportSettings {
        ExportSettings {
            raster_pitch: self.raster_pitch,
            method: self.method.clone(),
            name_prefix: format!("{}_split{}_", self.roi_name, group),
        }
    }

    /// `<output_dir>/<base_name>_<group>.<extension>`
    pub fn group_path(&self, group: usize, extension: &str) -> PathBuf {
        let file_name = format!("{}_{}.{}", self.base_name, group, extension);
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => Path::new(&file_name).to_path_buf(),
        }
    }
}
