pub mod guard;
pub mod late_fee;
pub mod status;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{EnrollmentId, PaymentId, PaymentMethod};

pub use guard::{
    clamp_proposed_payment, ClampOutcome, ClampedField, ClampedWarning, ProposedAmounts,
};
pub use late_fee::LateFeePolicy;
pub use status::{
    compute_status, payment_contributions, totals_by_method, PaymentContribution, PaymentStatus,
};

/// one recorded payment against an enrollment, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_id: PaymentId,
    pub enrollment_id: EnrollmentId,
    /// cash or instrument amount received
    pub amount: Money,
    /// extra charge collected on top of `amount`; never reduces the due amount
    pub late_fee: Money,
    /// waiver granted with this payment, clears due amount beyond the cash received
    pub discount: Money,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
}

impl PaymentRecord {
    pub fn new(
        enrollment_id: EnrollmentId,
        amount: Money,
        discount: Money,
        payment_date: NaiveDate,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            payment_id: Uuid::new_v4(),
            enrollment_id,
            amount,
            late_fee: Money::ZERO,
            discount,
            payment_date,
            payment_method,
            transaction_id: None,
        }
    }

    pub fn with_late_fee(mut self, late_fee: Money) -> Self {
        self.late_fee = late_fee;
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// how much of the due amount this payment clears
    pub fn due_reduction(&self) -> Money {
        self.amount + self.discount
    }

    /// cash actually collected, late fee included
    pub fn cash_collected(&self) -> Money {
        self.amount + self.late_fee
    }

    /// true when a non-cash payment has no transaction id
    pub fn is_missing_transaction_id(&self) -> bool {
        self.payment_method.requires_transaction_id()
            && self
                .transaction_id
                .as_deref()
                .map_or(true, |id| id.trim().is_empty())
    }
}

/// a payment the caller wants to record, before clamping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentProposal {
    pub amount: Money,
    pub discount: Money,
    /// `None` lets the ledger assess a late fee from its policy
    pub late_fee: Option<Money>,
    /// `None` records the payment as of today
    pub payment_date: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
}

impl PaymentProposal {
    pub fn new(amount: Money, payment_method: PaymentMethod) -> Self {
        Self {
            amount,
            discount: Money::ZERO,
            late_fee: None,
            payment_date: None,
            payment_method,
            transaction_id: None,
        }
    }

    pub fn cash(amount: Money) -> Self {
        Self::new(amount, PaymentMethod::Cash)
    }

    pub fn discount(mut self, discount: Money) -> Self {
        self.discount = discount;
        self
    }

    pub fn late_fee(mut self, late_fee: Money) -> Self {
        self.late_fee = Some(late_fee);
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.payment_date = Some(date);
        self
    }

    pub fn transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// the part of the proposal the guard constrains
    pub fn amounts(&self) -> ProposedAmounts {
        ProposedAmounts {
            amount: self.amount,
            discount: self.discount,
        }
    }
}
