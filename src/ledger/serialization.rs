/// serialization support for ledgers
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::{totals_by_method, PaymentContribution, PaymentRecord, PaymentStatus};
use crate::types::{EnrollmentId, PaymentMethod};

use super::Ledger;

/// serializable view of a ledger; amounts stay raw decimals, never formatted
#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerView {
    pub enrollment: EnrollmentView,
    pub currency_code: String,
    pub status: PaymentStatus,
    pub payments: Vec<PaymentRecord>,
    pub contributions: Vec<PaymentContribution>,
    pub collected_by_method: BTreeMap<PaymentMethod, Money>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollmentView {
    pub enrollment_id: EnrollmentId,
    pub student_id: String,
    pub course_name: String,
    pub course_fees: Money,
    pub admission_discount: Money,
    pub total_due: Money,
    pub fee_due_date: Option<NaiveDate>,
}

impl LedgerView {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let enrollment = ledger.enrollment();
        LedgerView {
            enrollment: EnrollmentView {
                enrollment_id: enrollment.enrollment_id,
                student_id: enrollment.student_id.clone(),
                course_name: enrollment.course_name.clone(),
                course_fees: enrollment.course_fees,
                admission_discount: enrollment.admission_discount,
                total_due: ledger.total_due(),
                fee_due_date: enrollment.fee_due_date,
            },
            currency_code: ledger.config().currency_code.clone(),
            status: ledger.status(),
            payments: ledger.payments().to_vec(),
            contributions: ledger.contributions(),
            collected_by_method: totals_by_method(ledger.payments()),
        }
    }
}

impl Ledger {
    pub fn view(&self) -> LedgerView {
        LedgerView::from_ledger(self)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.view()).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.view())
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    /// pretty json snapshot for debugging
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}
