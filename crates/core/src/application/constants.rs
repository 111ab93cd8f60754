// Application constants (no magic values)
use std::time::Duration;

/// Upper bound accepted for a whole-sequence deadline (1 minute)
pub const MAX_DEADLINE: Duration = Duration::from_secs(60);

/// Event name suffix appended to `Entity::KIND` on publish
pub const CREATED_EVENT_SUFFIX: &str = "created";
