use thiserror::Error;

use crate::decimal::Money;
use crate::types::{EnrollmentId, PaymentId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error(
        "invalid fee schedule: course fees {course_fees}, admission discount {admission_discount}"
    )]
    InvalidSchedule {
        course_fees: Money,
        admission_discount: Money,
    },

    #[error("invalid payment {field}: {amount}")]
    InvalidPaymentAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("unknown payment method: {value}")]
    UnknownPaymentMethod {
        value: String,
    },

    #[error("payment {payment_id} belongs to enrollment {found}, expected {expected}")]
    ForeignPayment {
        payment_id: PaymentId,
        expected: EnrollmentId,
        found: EnrollmentId,
    },

    #[error("nothing to record: payment is zero after clamping")]
    NothingToRecord,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
