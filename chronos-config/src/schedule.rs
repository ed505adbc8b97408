// Serializable schedule definitions

use crate::registry::ScheduleRegistry;
use crate::{ConfigError, Result};
use chronos_core::{Chronos, FieldSpec, Mode, Span};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One schedule as written in a configuration file.
///
/// Calendar fields apply according to `mode`:
///
/// | Mode         | Fields                          |
/// |--------------|---------------------------------|
/// | `day`        | `year`, `day_of_year`           |
/// | `month`      | `year`, `month`, `day`          |
/// | `week`       | `year`, `week`, `weekday`       |
/// | `month_week` | `year`, `month`, `week`, `weekday` |
///
/// Missing fields match every value. Setting a field the mode does not use
/// is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleDef {
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_year: Option<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<FieldSpec>,
}

impl ScheduleDef {
    /// An unconstrained schedule in `mode`.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Calendar specs in the order the mode expects them.
    pub fn calendar_specs(&self) -> Result<Vec<FieldSpec>> {
        let used: Vec<(&str, &Option<FieldSpec>)> = match self.mode {
            Mode::Day => vec![("year", &self.year), ("day_of_year", &self.day_of_year)],
            Mode::Month => vec![
                ("year", &self.year),
                ("month", &self.month),
                ("day", &self.day),
            ],
            Mode::Week => vec![
                ("year", &self.year),
                ("week", &self.week),
                ("weekday", &self.weekday),
            ],
            Mode::MonthWeek => vec![
                ("year", &self.year),
                ("month", &self.month),
                ("week", &self.week),
                ("weekday", &self.weekday),
            ],
        };

        let all = [
            ("month", &self.month),
            ("day", &self.day),
            ("day_of_year", &self.day_of_year),
            ("week", &self.week),
            ("weekday", &self.weekday),
        ];
        for (name, spec) in all {
            if spec.is_some() && !used.iter().any(|(field, _)| *field == name) {
                return Err(ConfigError::ValidationError(format!(
                    "{} is not a field of {} schedules",
                    name, self.mode
                )));
            }
        }

        Ok(used
            .iter()
            .map(|(_, spec)| (*spec).clone().unwrap_or_default())
            .collect())
    }

    /// Clock specs: hour, minute, second.
    pub fn clock_specs(&self) -> Vec<FieldSpec> {
        [&self.hour, &self.minute, &self.second]
            .into_iter()
            .map(|spec| spec.clone().unwrap_or_default())
            .collect()
    }

    /// Build the schedule.
    pub fn build(&self) -> Result<Chronos> {
        Ok(Chronos::new(
            &self.calendar_specs()?,
            &self.clock_specs(),
            self.mode,
        )?)
    }
}

/// A recurring window between two named schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpanDef {
    pub start: String,
    pub end: String,
}

impl SpanDef {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Build the span, resolving its start and end in `file`.
    pub fn build(&self, file: &ScheduleFile) -> Result<Span> {
        let resolve = |name: &str| {
            file.schedules
                .get(name)
                .ok_or_else(|| ConfigError::NotFound(name.to_string()))?
                .build()
        };
        Ok(Span::new(resolve(&self.start)?, resolve(&self.end)?))
    }
}

/// Contents of a schedule file.
///
/// ```toml
/// [schedules.standup]
/// mode = "week"
/// weekday = { range = { start = 1, end = 5 } }
/// hour = { at = 9 }
/// minute = { at = 30 }
/// second = { at = 0 }
///
/// [spans.office]
/// start = "opening"
/// end = "closing"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleFile {
    pub schedules: BTreeMap<String, ScheduleDef>,
    pub spans: BTreeMap<String, SpanDef>,
}

impl ScheduleFile {
    /// Build every schedule and span.
    pub fn build(&self) -> Result<ScheduleRegistry> {
        let mut registry = ScheduleRegistry::new();
        for (name, def) in &self.schedules {
            let chronos = def
                .build()
                .inspect_err(|err| warn!(schedule = %name, error = %err, "Invalid schedule"))?;
            registry.insert(name.clone(), chronos);
        }
        for (name, def) in &self.spans {
            registry.insert_span(name.clone(), def.build(self)?);
        }
        debug!(
            schedules = self.schedules.len(),
            spans = self.spans.len(),
            "Built schedule registry"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_match_everything() {
        let def = ScheduleDef::new(Mode::Month);
        assert_eq!(def.calendar_specs().unwrap(), vec![FieldSpec::Any; 3]);
        assert_eq!(def.clock_specs(), vec![FieldSpec::Any; 3]);
    }

    #[test]
    fn test_fields_follow_mode_order() {
        let def = ScheduleDef {
            week: Some(FieldSpec::at(-1)),
            weekday: Some(FieldSpec::at(5)),
            ..ScheduleDef::new(Mode::MonthWeek)
        };
        assert_eq!(
            def.calendar_specs().unwrap(),
            vec![
                FieldSpec::Any,
                FieldSpec::Any,
                FieldSpec::at(-1),
                FieldSpec::at(5)
            ]
        );
    }

    #[test]
    fn test_foreign_field_is_rejected() {
        let def = ScheduleDef {
            day: Some(FieldSpec::at(1)),
            ..ScheduleDef::new(Mode::Week)
        };
        assert!(matches!(
            def.calendar_specs(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_build_reports_invalid_specs() {
        let def = ScheduleDef {
            month: Some(FieldSpec::at(13)),
            ..ScheduleDef::default()
        };
        assert!(matches!(def.build(), Err(ConfigError::Schedule(_))));
    }

    #[test]
    fn test_span_with_unknown_schedule() {
        let file = ScheduleFile::default();
        let err = SpanDef::new("open", "close").build(&file).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(name) if name == "open"));
    }
}
