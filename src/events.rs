use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::{ClampedWarning, PaymentStatus};
use crate::types::{EnrollmentId, PaymentId, PaymentMethod};

/// all events that can be emitted by a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    LedgerOpened {
        enrollment_id: EnrollmentId,
        total_due: Money,
        payments_loaded: usize,
        timestamp: DateTime<Utc>,
    },

    // payment events
    PaymentClamped {
        enrollment_id: EnrollmentId,
        warning: ClampedWarning,
        timestamp: DateTime<Utc>,
    },
    LateFeeAssessed {
        enrollment_id: EnrollmentId,
        fee_due_date: NaiveDate,
        payment_date: NaiveDate,
        fee: Money,
        timestamp: DateTime<Utc>,
    },
    TransactionReferenceMissing {
        enrollment_id: EnrollmentId,
        payment_id: PaymentId,
        payment_method: PaymentMethod,
        timestamp: DateTime<Utc>,
    },
    PaymentRecorded {
        enrollment_id: EnrollmentId,
        payment_id: PaymentId,
        amount: Money,
        discount: Money,
        late_fee: Money,
        balance_after: Money,
        timestamp: DateTime<Utc>,
    },

    // status events
    EnrollmentSettled {
        enrollment_id: EnrollmentId,
        status: PaymentStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
