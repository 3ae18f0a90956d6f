use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;

use super::PaymentStatus;

/// amount and discount of a payment being prepared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedAmounts {
    pub amount: Money,
    pub discount: Money,
}

impl ProposedAmounts {
    pub fn new(amount: Money, discount: Money) -> Self {
        Self { amount, discount }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampedField {
    Amount,
    Discount,
}

/// non-fatal notice that the guard reduced part of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampedWarning {
    pub proposed: ProposedAmounts,
    pub clamped: ProposedAmounts,
    /// outstanding balance the proposal was checked against
    pub balance: Money,
}

impl ClampedWarning {
    pub fn amount_reduced(&self) -> bool {
        self.clamped.amount < self.proposed.amount
    }

    pub fn discount_reduced(&self) -> bool {
        self.clamped.discount < self.proposed.discount
    }

    pub fn fields(&self) -> Vec<ClampedField> {
        let mut fields = Vec::with_capacity(2);
        if self.amount_reduced() {
            fields.push(ClampedField::Amount);
        }
        if self.discount_reduced() {
            fields.push(ClampedField::Discount);
        }
        fields
    }
}

impl fmt::Display for ClampedWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payment clamped against balance {}:", self.balance)?;
        if self.amount_reduced() {
            write!(f, " amount {} -> {}", self.proposed.amount, self.clamped.amount)?;
        }
        if self.discount_reduced() {
            write!(f, " discount {} -> {}", self.proposed.discount, self.clamped.discount)?;
        }
        Ok(())
    }
}

/// clamped amounts plus a warning when anything was reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampOutcome {
    pub amounts: ProposedAmounts,
    pub warning: Option<ClampedWarning>,
}

impl ClampOutcome {
    pub fn is_clamped(&self) -> bool {
        self.warning.is_some()
    }
}

/// constrain a proposed payment before it is recorded
///
/// The amount is clamped to the outstanding balance first. The discount is then
/// clamped to the smallest of itself, the balance and the already clamped
/// amount. History is never touched; only the proposal is constrained.
pub fn clamp_proposed_payment(proposed: ProposedAmounts, status: &PaymentStatus) -> ClampOutcome {
    let balance = status.balance;

    let amount = proposed.amount.min(balance);
    let discount = proposed.discount.min(balance).min(amount);
    let clamped = ProposedAmounts { amount, discount };

    let warning = if clamped != proposed {
        Some(ClampedWarning {
            proposed,
            clamped,
            balance,
        })
    } else {
        None
    };

    ClampOutcome {
        amounts: clamped,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::compute_status;

    fn outstanding(balance: i64) -> PaymentStatus {
        compute_status(Money::from_major(balance), &[])
    }

    fn amounts(amount: i64, discount: i64) -> ProposedAmounts {
        ProposedAmounts::new(Money::from_major(amount), Money::from_major(discount))
    }

    #[test]
    fn test_amount_clamped_to_balance() {
        let outcome = clamp_proposed_payment(amounts(500, 0), &outstanding(300));

        assert_eq!(outcome.amounts, amounts(300, 0));
        let warning = outcome.warning.unwrap();
        assert!(warning.amount_reduced());
        assert!(!warning.discount_reduced());
        assert_eq!(warning.fields(), vec![ClampedField::Amount]);
        assert_eq!(warning.balance, Money::from_major(300));
    }

    #[test]
    fn test_discount_clamped_to_amount() {
        let outcome = clamp_proposed_payment(amounts(200, 250), &outstanding(300));

        assert_eq!(outcome.amounts, amounts(200, 200));
        let warning = outcome.warning.unwrap();
        assert!(!warning.amount_reduced());
        assert!(warning.discount_reduced());
        assert_eq!(warning.proposed, amounts(200, 250));
    }

    #[test]
    fn test_discount_checked_against_clamped_amount() {
        // amount 500 -> 300 first, then discount 400 -> 300, not 400
        let outcome = clamp_proposed_payment(amounts(500, 400), &outstanding(300));

        assert_eq!(outcome.amounts, amounts(300, 300));
        assert_eq!(
            outcome.warning.unwrap().fields(),
            vec![ClampedField::Amount, ClampedField::Discount]
        );
    }

    #[test]
    fn test_within_limits_passes_through() {
        let outcome = clamp_proposed_payment(amounts(250, 50), &outstanding(300));
        assert_eq!(outcome.amounts, amounts(250, 50));
        assert!(outcome.warning.is_none());
        assert!(!outcome.is_clamped());
    }

    #[test]
    fn test_exact_balance_is_not_clamped() {
        let outcome = clamp_proposed_payment(amounts(300, 300), &outstanding(300));
        assert_eq!(outcome.amounts, amounts(300, 300));
        assert!(!outcome.is_clamped());
    }

    #[test]
    fn test_settled_balance_clamps_everything_to_zero() {
        let outcome = clamp_proposed_payment(amounts(1_000, 100), &outstanding(0));
        assert_eq!(outcome.amounts, amounts(0, 0));
        assert!(outcome.is_clamped());
    }

    #[test]
    fn test_warning_message() {
        let outcome = clamp_proposed_payment(amounts(500, 0), &outstanding(300));
        assert_eq!(
            outcome.warning.unwrap().to_string(),
            "payment clamped against balance 300: amount 500 -> 300"
        );
    }
}
