// Schedule file loaders

use crate::schedule::ScheduleFile;
use crate::{ConfigError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Supported schedule file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Schedule file loader
#[derive(Debug, Clone, Copy)]
pub struct ScheduleLoader {
    format: FileFormat,
}

impl ScheduleLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    /// Load schedules from file
    pub fn load_file(&self, path: &str) -> Result<ScheduleFile> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("Failed to read {}: {}", path, e)))?;

        let file = self.parse(&content)?;
        debug!(
            path,
            format = ?self.format,
            schedules = file.schedules.len(),
            spans = file.spans.len(),
            "Loaded schedule file"
        );
        Ok(file)
    }

    /// Parse schedules from string
    pub fn parse(&self, content: &str) -> Result<ScheduleFile> {
        let value = match self.format {
            FileFormat::Json => self.parse_json(content)?,
            FileFormat::Toml => self.parse_toml(content)?,
        };

        serde_json::from_value(value)
            .map_err(|e| ConfigError::ParseError(format!("Invalid schedule file: {}", e)))
    }

    fn parse_json(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        serde_json::to_value(toml_value)
            .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronos_core::{FieldSpec, Mode};

    #[test]
    fn test_parse_json() {
        let loader = ScheduleLoader::new(FileFormat::Json);
        let json = r#"{
            "schedules": {
                "payday": { "mode": "month", "day": { "at": -1 }, "hour": { "at": 9 } }
            }
        }"#;

        let file = loader.parse(json).unwrap();
        let payday = &file.schedules["payday"];
        assert_eq!(payday.mode, Mode::Month);
        assert_eq!(payday.day, Some(FieldSpec::at(-1)));
        assert_eq!(payday.minute, None);
    }

    #[test]
    fn test_parse_toml() {
        let loader = ScheduleLoader::new(FileFormat::Toml);
        let toml = r#"
            [schedules.standup]
            mode = "week"
            weekday = { range = { start = 1, end = 5 } }
            hour = { at = 9 }
            minute = { list = [0, 30] }
            second = { at = 0 }

            [schedules.closing]
            hour = { at = 17 }

            [spans.office]
            start = "standup"
            end = "closing"
        "#;

        let file = loader.parse(toml).unwrap();
        let standup = &file.schedules["standup"];
        assert_eq!(standup.mode, Mode::Week);
        assert_eq!(standup.weekday, Some(FieldSpec::range(1, 5)));
        assert_eq!(standup.minute, Some(FieldSpec::list([0, 30])));
        assert_eq!(file.schedules["closing"].mode, Mode::Month);
        assert_eq!(file.spans["office"].end, "closing");
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let loader = ScheduleLoader::new(FileFormat::Json);
        let result = loader.parse(r#"{"schedules": {"x": {"hours": {"at": 1}}}}"#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_parse_invalid_syntax() {
        let loader = ScheduleLoader::new(FileFormat::Toml);
        assert!(matches!(
            loader.parse("[schedules"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);
        assert!(ScheduleLoader::auto("schedules.toml").is_ok());
        assert!(ScheduleLoader::auto("schedules").is_err());
        assert!(ScheduleLoader::auto("schedules.ini").is_err());
    }
}
