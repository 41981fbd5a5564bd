use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub mod buffer2;
pub mod log_setup;

pub use buffer2::{Buffer2, ChannelShapeError, Window};

#[derive(Debug, thiserror::Error)]
pub enum FileExtensionError {
    #[error("Failed to get file extension")]
    MissingFileExtension,
    #[error("Unsupported file extension for file: {0}")]
    UnsupportedFileExtension(String),
}

pub type FileFormatResult<T> = Result<T, FileExtensionError>;

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error(transparent)]
    Extension(#[from] FileExtensionError),
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

pub fn get_file_extension(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|os_str| os_str.to_str())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    pub fn from_file_name(file_name: &str) -> FileFormatResult<Self> {
        let ext = get_file_extension(file_name).ok_or(FileExtensionError::MissingFileExtension)?;

        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Ok(Self::Yaml)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(FileExtensionError::UnsupportedFileExtension(
                file_name.to_string(),
            ))
        }
    }
}

pub fn serialize<T: Serialize>(value: &T, format: FileFormat) -> SerdeFormatResult<String> {
    Ok(match format {
        FileFormat::Yaml => serde_yml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    })
}

pub fn deserialize<T: DeserializeOwned>(
    serialized: &str,
    format: FileFormat,
) -> SerdeFormatResult<T> {
    match format {
        FileFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        FileFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        name: String,
        radius: f32,
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(FileFormat::from_file_name("run.yaml").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_file_name("run.YML").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_file_name("out.json").unwrap(), FileFormat::Json);
        assert!(matches!(
            FileFormat::from_file_name("noext"),
            Err(FileExtensionError::MissingFileExtension)
        ));
        assert!(matches!(
            FileFormat::from_file_name("table.csv"),
            Err(FileExtensionError::UnsupportedFileExtension(_))
        ));
    }

    #[test]
    fn test_serialize_then_deserialize_both_formats() {
        let sample = Sample {
            name: "aperture".to_string(),
            radius: 5.0,
        };
        for format in [FileFormat::Yaml, FileFormat::Json] {
            let text = serialize(&sample, format).unwrap();
            let back: Sample = deserialize(&text, format).unwrap();
            assert_eq!(back, sample);
        }
    }

    #[test]
    fn test_deserialize_reports_format_error() {
        let err = deserialize::<Sample>("{ not json", FileFormat::Json).unwrap_err();
        assert!(matches!(err, SerdeFormatError::Json(_)));
    }
}
