pub mod serialization;

use hourglass_rs::SafeTimeProvider;

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{EventStore, LedgerEvent};
use crate::payments::{
    clamp_proposed_payment, compute_status, payment_contributions, ClampOutcome, ClampedWarning,
    PaymentContribution, PaymentProposal, PaymentRecord, PaymentStatus,
};
use crate::schedule::{resolve_total_due, ChargeableEnrollment};
use crate::types::EnrollmentId;

pub use serialization::LedgerView;

/// result of recording a payment
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPayment {
    pub record: PaymentRecord,
    /// set when the proposal was reduced; surface it to the user
    pub warning: Option<ClampedWarning>,
    pub status: PaymentStatus,
}

/// fee ledger for one enrollment
///
/// Holds the resolved schedule and the append-only payment history. Recording
/// reads the status, clamps the proposal and appends the record within one
/// `&mut self` call, so a caller holding the ledger cannot clamp against a stale
/// balance. Callers that persist records elsewhere must serialize that sequence
/// per enrollment themselves.
#[derive(Debug)]
pub struct Ledger {
    enrollment: ChargeableEnrollment,
    total_due: Money,
    config: LedgerConfig,
    payments: Vec<PaymentRecord>,
    pub events: EventStore,
}

impl Ledger {
    /// open a ledger with no payments
    pub fn open(
        enrollment: ChargeableEnrollment,
        config: LedgerConfig,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        Self::from_history(enrollment, Vec::new(), config, time_provider)
    }

    /// rebuild a ledger from persisted payments; history is not re-clamped
    pub fn from_history(
        enrollment: ChargeableEnrollment,
        payments: Vec<PaymentRecord>,
        config: LedgerConfig,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        config.validate()?;
        let total_due = resolve_total_due(&enrollment)?;

        if let Some(foreign) = payments
            .iter()
            .find(|p| p.enrollment_id != enrollment.enrollment_id)
        {
            return Err(LedgerError::ForeignPayment {
                payment_id: foreign.payment_id,
                expected: enrollment.enrollment_id,
                found: foreign.enrollment_id,
            });
        }

        let mut events = EventStore::new();
        events.emit(LedgerEvent::LedgerOpened {
            enrollment_id: enrollment.enrollment_id,
            total_due,
            payments_loaded: payments.len(),
            timestamp: time_provider.now(),
        });

        tracing::debug!(
            enrollment_id = %enrollment.enrollment_id,
            %total_due,
            payments = payments.len(),
            "opened ledger"
        );

        Ok(Self {
            enrollment,
            total_due,
            config,
            payments,
            events,
        })
    }

    pub fn enrollment(&self) -> &ChargeableEnrollment {
        &self.enrollment
    }

    pub fn enrollment_id(&self) -> EnrollmentId {
        self.enrollment.enrollment_id
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn total_due(&self) -> Money {
        self.total_due
    }

    /// payments in the order they were recorded
    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    pub fn status(&self) -> PaymentStatus {
        compute_status(self.total_due, &self.payments)
    }

    pub fn contributions(&self) -> Vec<PaymentContribution> {
        payment_contributions(&self.payments)
    }

    /// run the input guard against the current balance without recording
    pub fn preview_payment(&self, proposal: &PaymentProposal) -> ClampOutcome {
        clamp_proposed_payment(proposal.amounts(), &self.status())
    }

    /// clamp, complete and append a new payment
    pub fn record_payment(
        &mut self,
        proposal: PaymentProposal,
        time_provider: &SafeTimeProvider,
    ) -> Result<RecordedPayment> {
        validate_proposal(&proposal)?;

        let now = time_provider.now();
        let before = self.status();
        let outcome = clamp_proposed_payment(proposal.amounts(), &before);
        let payment_date = proposal.payment_date.unwrap_or_else(|| now.date_naive());

        let clamped = outcome.amounts;
        let explicit_late_fee = proposal.late_fee.unwrap_or(Money::ZERO);
        if clamped.amount.is_zero()
            && clamped.discount.is_zero()
            && explicit_late_fee.is_zero()
            && !self.config.allow_zero_amount_payments
        {
            return Err(LedgerError::NothingToRecord);
        }

        // the policy only prices a payment that is actually accepted
        let assessed_late_fee = match (
            proposal.late_fee,
            &self.config.late_fee_policy,
            self.enrollment.fee_due_date,
        ) {
            (None, Some(policy), Some(due_date)) if clamped.amount.is_positive() => {
                Some((due_date, policy.assess(due_date, payment_date)))
            }
            _ => None,
        };
        let late_fee = proposal
            .late_fee
            .or(assessed_late_fee.map(|(_, fee)| fee))
            .unwrap_or(Money::ZERO);

        let enrollment_id = self.enrollment.enrollment_id;

        if let Some(warning) = outcome.warning {
            tracing::warn!(%enrollment_id, %warning, "proposed payment clamped");
            self.events.emit(LedgerEvent::PaymentClamped {
                enrollment_id,
                warning,
                timestamp: now,
            });
        }

        if let Some((fee_due_date, fee)) = assessed_late_fee {
            if !fee.is_zero() {
                self.events.emit(LedgerEvent::LateFeeAssessed {
                    enrollment_id,
                    fee_due_date,
                    payment_date,
                    fee,
                    timestamp: now,
                });
            }
        }

        let mut record = PaymentRecord::new(
            enrollment_id,
            clamped.amount,
            clamped.discount,
            payment_date,
            proposal.payment_method,
        )
        .with_late_fee(late_fee);
        record.transaction_id = proposal.transaction_id;

        if self.config.warn_on_missing_transaction_id && record.is_missing_transaction_id() {
            tracing::warn!(
                %enrollment_id,
                payment_id = %record.payment_id,
                method = %record.payment_method,
                "non-cash payment recorded without transaction id"
            );
            self.events.emit(LedgerEvent::TransactionReferenceMissing {
                enrollment_id,
                payment_id: record.payment_id,
                payment_method: record.payment_method,
                timestamp: now,
            });
        }

        self.payments.push(record.clone());
        let after = self.status();

        self.events.emit(LedgerEvent::PaymentRecorded {
            enrollment_id,
            payment_id: record.payment_id,
            amount: record.amount,
            discount: record.discount,
            late_fee: record.late_fee,
            balance_after: after.balance,
            timestamp: now,
        });

        if after.is_fully_paid && !before.is_fully_paid {
            self.events.emit(LedgerEvent::EnrollmentSettled {
                enrollment_id,
                status: after,
                timestamp: now,
            });
        }

        tracing::debug!(
            %enrollment_id,
            payment_id = %record.payment_id,
            amount = %record.amount,
            balance = %after.balance,
            "recorded payment"
        );

        Ok(RecordedPayment {
            record,
            warning: outcome.warning,
            status: after,
        })
    }

    /// get events
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        self.events.take_events()
    }
}

fn validate_proposal(proposal: &PaymentProposal) -> Result<()> {
    if proposal.amount.is_negative() {
        return Err(LedgerError::InvalidPaymentAmount {
            field: "amount",
            amount: proposal.amount,
        });
    }
    if proposal.discount.is_negative() {
        return Err(LedgerError::InvalidPaymentAmount {
            field: "discount",
            amount: proposal.discount,
        });
    }
    if let Some(late_fee) = proposal.late_fee {
        if late_fee.is_negative() {
            return Err(LedgerError::InvalidPaymentAmount {
                field: "late fee",
                amount: late_fee,
            });
        }
    }
    Ok(())
}
