// Chronos - a cron-like temporal pattern engine
//
// Schedules constrain calendar and clock fields and answer next, previous
// and membership queries. Optional crates add file and environment
// configuration.

// Re-export core functionality
pub use chronos_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use chronos_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Calendar, Chronos, ChronosError, ChronosResult, Clock, FieldSpec, Mode, Span,
    };

    #[cfg(feature = "config")]
    pub use chronos_config::{ScheduleDef, ScheduleRegistry};

    pub use chrono::NaiveDateTime;
}
