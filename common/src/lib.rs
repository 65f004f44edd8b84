use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod file_format;
mod log_setup;
pub mod test_utils;

pub use file_format::{get_file_extension, FileExtensionError, SerdeFormat};
pub use log_setup::setup_logging;

pub const EPSILON: f64 = 1e-9;

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Extension(#[from] FileExtensionError),
    #[error("Failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

pub fn serialize<T: Serialize>(value: &T, format: SerdeFormat) -> SerdeFormatResult<String> {
    match format {
        SerdeFormat::Yaml => Ok(serde_yml::to_string(value)?),
        SerdeFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

pub fn deserialize<T: DeserializeOwned>(
    serialized: &str,
    format: SerdeFormat,
) -> SerdeFormatResult<T> {
    match format {
        SerdeFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        SerdeFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

/// Reads `file_name` and deserializes it with the format implied by its extension.
pub fn deserialize_file<T: DeserializeOwned>(file_name: &str) -> SerdeFormatResult<T> {
    let format = SerdeFormat::from_file_name(file_name)?;
    let serialized =
        std::fs::read_to_string(file_name).map_err(|source| SerdeFormatError::Read {
            path: file_name.to_string(),
            source,
        })?;

    deserialize(&serialized, format)
}
