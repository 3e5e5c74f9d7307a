//! Runtime-adjustable payroll settings.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{LedgerError, LedgerResult};

/// Standard daily working hours, read by every salary generation.
///
/// Changing the value affects later generations only; stored salary records
/// are never recomputed.
#[derive(Debug)]
pub struct Settings {
    daily_hours: RwLock<Decimal>,
}

impl Settings {
    /// Creates settings with the configured starting value.
    pub fn new(daily_hours: Decimal) -> Self {
        Self {
            daily_hours: RwLock::new(daily_hours),
        }
    }

    /// Returns the standard daily working hours.
    pub fn daily_hours(&self) -> Decimal {
        *self.daily_hours.read()
    }

    /// Sets the standard daily working hours; must be in `(0, 24]`.
    pub fn set_daily_hours(&self, hours: Decimal) -> LedgerResult<Decimal> {
        if hours <= Decimal::ZERO || hours > Decimal::new(24, 0) {
            return Err(LedgerError::validation(
                "hours",
                format!("daily hours must be greater than 0 and at most 24, got {hours}"),
            ));
        }
        let previous = std::mem::replace(&mut *self.daily_hours.write(), hours);
        info!(previous = %previous, hours = %hours, "Standard daily hours updated");
        Ok(hours)
    }
}
