// Schedule configuration for chronos
//
// Schedules are defined in TOML or JSON files, or in prefixed environment
// variables, and built into a registry of named schedules and spans.

pub mod env;
pub mod error;
pub mod loader;
pub mod registry;
pub mod schedule;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{FileFormat, ScheduleLoader};
pub use registry::ScheduleRegistry;
pub use schedule::{ScheduleDef, ScheduleFile, SpanDef};
