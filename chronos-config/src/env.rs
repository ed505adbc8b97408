// Environment variable loading

use crate::schedule::ScheduleDef;
use crate::{ConfigError, Result};
use chronos_core::{FieldSpec, Mode};
use std::env;
use tracing::{debug, trace};

/// Reads one schedule from prefixed environment variables.
///
/// With prefix `BACKUP`, the variables are `BACKUP_MODE`, `BACKUP_YEAR`,
/// `BACKUP_MONTH`, `BACKUP_DAY`, `BACKUP_DAY_OF_YEAR`, `BACKUP_WEEK`,
/// `BACKUP_WEEKDAY`, `BACKUP_HOUR`, `BACKUP_MINUTE` and `BACKUP_SECOND`.
/// Field values are `*`, an integer, or a JSON field spec such as
/// `{"range":{"start":1,"end":5}}`.
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load the schedule from the process environment
    pub fn load(&self) -> Result<ScheduleDef> {
        self.load_from(env::vars())
    }

    /// Load `.env` first, then the environment
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<ScheduleDef> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok(); // Ignore if .env doesn't exist
        }
        self.load()
    }

    /// Load the schedule from key/value pairs
    pub fn load_from<I>(&self, vars: I) -> Result<ScheduleDef>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let head = format!("{}_", self.prefix);
        let mut def = ScheduleDef::default();
        let mut found = 0;

        for (key, value) in vars {
            let Some(field) = key.strip_prefix(&head) else {
                continue;
            };
            let field = field.to_lowercase();
            let slot = match field.as_str() {
                "mode" => {
                    def.mode = value.parse::<Mode>()?;
                    found += 1;
                    continue;
                }
                "year" => &mut def.year,
                "month" => &mut def.month,
                "day" => &mut def.day,
                "day_of_year" => &mut def.day_of_year,
                "week" => &mut def.week,
                "weekday" => &mut def.weekday,
                "hour" => &mut def.hour,
                "minute" => &mut def.minute,
                "second" => &mut def.second,
                _ => {
                    trace!(key = %key, "Ignoring unknown schedule variable");
                    continue;
                }
            };
            *slot = Some(parse_field(&key, &value)?);
            found += 1;
        }

        debug!(prefix = %self.prefix, fields = found, "Loaded schedule from environment");
        Ok(def)
    }

    /// Load a specific prefixed variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = format!("{}_{}", self.prefix, key.to_uppercase());
        env::var(&full_key).map_err(ConfigError::EnvError)
    }
}

fn parse_field(key: &str, value: &str) -> Result<FieldSpec> {
    let value = value.trim();
    if value == "*" {
        return Ok(FieldSpec::Any);
    }
    if let Ok(n) = value.parse::<i64>() {
        return Ok(FieldSpec::At(n));
    }
    serde_json::from_str(value)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", key, e)))
}
