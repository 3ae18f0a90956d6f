use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// late fee charged when a payment arrives after the fee due date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateFeePolicy {
    /// days after the due date before any fee applies
    pub grace_period_days: u32,
    /// charged once the grace period is over
    pub flat_fee: Money,
    /// charged for every day past the grace period
    pub per_day_fee: Money,
    pub maximum_fee: Option<Money>,
}

impl LateFeePolicy {
    pub fn flat(fee: Money, grace_period_days: u32) -> Self {
        Self {
            grace_period_days,
            flat_fee: fee,
            per_day_fee: Money::ZERO,
            maximum_fee: None,
        }
    }

    pub fn daily(per_day_fee: Money, grace_period_days: u32, maximum_fee: Option<Money>) -> Self {
        Self {
            grace_period_days,
            flat_fee: Money::ZERO,
            per_day_fee,
            maximum_fee,
        }
    }

    /// days counted against the payment, zero within the grace period
    pub fn days_late(&self, due_date: NaiveDate, payment_date: NaiveDate) -> u32 {
        let days_after_due = (payment_date - due_date).num_days();
        let days = days_after_due - i64::from(self.grace_period_days);
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    /// suggested late fee for a payment made on `payment_date`
    pub fn assess(&self, due_date: NaiveDate, payment_date: NaiveDate) -> Money {
        let days_late = self.days_late(due_date, payment_date);
        if days_late == 0 {
            return Money::ZERO;
        }

        let fee = self.flat_fee + self.per_day_fee * Decimal::from(days_late);
        match self.maximum_fee {
            Some(cap) => fee.min(cap),
            None => fee,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.flat_fee.is_negative() || self.per_day_fee.is_negative() {
            return Err(LedgerError::InvalidConfiguration {
                message: "late fee amounts must not be negative".to_string(),
            });
        }
        if let Some(cap) = self.maximum_fee {
            if cap.is_negative() {
                return Err(LedgerError::InvalidConfiguration {
                    message: format!("maximum late fee must not be negative: {}", cap),
                });
            }
        }
        Ok(())
    }
}
