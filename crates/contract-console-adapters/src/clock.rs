use chrono::{SecondsFormat, Utc};

use contract_console_core::{ClockPort, PortError};

#[derive(Debug, Clone, Default)]
pub struct SystemClockAdapter;

impl ClockPort for SystemClockAdapter {
    fn now_iso8601(&self) -> Result<String, PortError> {
        Ok(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
