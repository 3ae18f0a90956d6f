use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::payments::LateFeePolicy;

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// ISO 4217 code, informational only; amounts are never formatted here
    pub currency_code: String,
    pub late_fee_policy: Option<LateFeePolicy>,
    /// log and emit an event when a non-cash payment has no transaction id
    pub warn_on_missing_transaction_id: bool,
    /// record payments whose clamped amount, discount and late fee are all zero
    pub allow_zero_amount_payments: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl LedgerConfig {
    /// no late fees, transaction id warnings on
    pub fn standard() -> Self {
        Self {
            currency_code: "INR".to_string(),
            late_fee_policy: None,
            warn_on_missing_transaction_id: true,
            allow_zero_amount_payments: false,
        }
    }

    /// standard configuration with a late fee policy
    pub fn with_late_fees(policy: LateFeePolicy) -> Self {
        Self {
            late_fee_policy: Some(policy),
            ..Self::standard()
        }
    }

    /// flat late fee after a grace period, the common institute setup
    pub fn flat_late_fee(fee: Money, grace_period_days: u32) -> Self {
        Self::with_late_fees(LateFeePolicy::flat(fee, grace_period_days))
    }

    /// parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig =
            serde_json::from_str(json).map_err(|e| LedgerError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    pub fn validate(&self) -> Result<()> {
        let code = self.currency_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("currency code must be three letters: {:?}", self.currency_code),
            });
        }
        if let Some(policy) = &self.late_fee_policy {
            policy.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.currency_code, "INR");
        assert!(config.late_fee_policy.is_none());
        assert!(config.warn_on_missing_transaction_id);
        assert!(!config.allow_zero_amount_payments);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = LedgerConfig::from_json(
            r#"{
                "late_fee_policy": {
                    "grace_period_days": 7,
                    "flat_fee": "250",
                    "per_day_fee": "0",
                    "maximum_fee": null
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.currency_code, "INR");
        let policy = config.late_fee_policy.unwrap();
        assert_eq!(policy.grace_period_days, 7);
        assert_eq!(policy.flat_fee, Money::from_major(250));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            LedgerConfig::from_json("{ not json"),
            Err(LedgerError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            LedgerConfig::from_json(r#"{ "currency_code": "RUPEES" }"#),
            Err(LedgerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_of_preset() {
        let config = LedgerConfig::flat_late_fee(Money::from_major(100), 5);
        let parsed = LedgerConfig::from_json(&config.to_json_pretty()).unwrap();
        assert_eq!(parsed, config);
    }
}
