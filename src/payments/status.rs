use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{PaymentId, PaymentMethod};

use super::PaymentRecord;

/// derived payment status for one enrollment; recompute after every new payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub total_due: Money,
    /// sum of payment amounts; late fees excluded
    pub total_paid: Money,
    pub total_discount: Money,
    pub total_late_fees: Money,
    pub balance: Money,
    pub is_fully_paid: bool,
}

impl PaymentStatus {
    /// status of an enrollment with no payments yet
    pub fn unpaid(total_due: Money) -> Self {
        compute_status(total_due, &[])
    }

    /// due amount cleared so far, discounts included
    pub fn total_cleared(&self) -> Money {
        self.total_paid + self.total_discount
    }

    /// cash collected so far, late fees included
    pub fn total_collected(&self) -> Money {
        self.total_paid + self.total_late_fees
    }
}

/// fold a payment history into a status
///
/// `balance = max(0, total_due - Σ(amount + discount))`. Over-payment floors
/// the balance at zero and is not tracked as credit. Only sums are taken, so
/// the result does not depend on payment order.
pub fn compute_status(total_due: Money, payments: &[PaymentRecord]) -> PaymentStatus {
    let total_paid: Money = payments.iter().map(|p| p.amount).sum();
    let total_discount: Money = payments.iter().map(|p| p.discount).sum();
    let total_late_fees: Money = payments.iter().map(|p| p.late_fee).sum();

    let balance = total_due.saturating_sub(total_paid + total_discount);

    tracing::debug!(
        %total_due,
        %total_paid,
        %total_discount,
        %balance,
        payments = payments.len(),
        "computed payment status"
    );

    PaymentStatus {
        total_due,
        total_paid,
        total_discount,
        total_late_fees,
        balance,
        is_fully_paid: balance.is_zero(),
    }
}

/// what one payment contributed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentContribution {
    pub payment_id: PaymentId,
    pub amount: Money,
    pub discount: Money,
    pub late_fee: Money,
    /// amount + discount
    pub due_reduction: Money,
    /// amount + late fee
    pub cash_collected: Money,
}

/// per-payment breakdown, in input order
pub fn payment_contributions(payments: &[PaymentRecord]) -> Vec<PaymentContribution> {
    payments
        .iter()
        .map(|p| PaymentContribution {
            payment_id: p.payment_id,
            amount: p.amount,
            discount: p.discount,
            late_fee: p.late_fee,
            due_reduction: p.due_reduction(),
            cash_collected: p.cash_collected(),
        })
        .collect()
}

/// cash collected per payment method
pub fn totals_by_method(payments: &[PaymentRecord]) -> BTreeMap<PaymentMethod, Money> {
    let mut totals = BTreeMap::new();
    for payment in payments {
        *totals.entry(payment.payment_method).or_insert(Money::ZERO) += payment.cash_collected();
    }
    totals
}
