pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod payments;
pub mod schedule;
pub mod types;

// re-export key types
pub use config::LedgerConfig;
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use events::{EventStore, LedgerEvent};
pub use ledger::{Ledger, LedgerView, RecordedPayment};
pub use payments::{
    clamp_proposed_payment, compute_status, payment_contributions, totals_by_method, ClampOutcome,
    ClampedField, ClampedWarning, LateFeePolicy, PaymentContribution, PaymentProposal,
    PaymentRecord, PaymentStatus, ProposedAmounts,
};
pub use schedule::{resolve_total_due, ChargeableEnrollment, EnrollmentBuilder};
pub use types::{EnrollmentId, PaymentId, PaymentMethod};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
