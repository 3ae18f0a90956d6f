/// quick start - resolve a fee schedule and record two payments
use fee_ledger_rs::{
    ChargeableEnrollment, Ledger, LedgerConfig, Money, PaymentMethod, PaymentProposal,
};
use fee_ledger_rs::{SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::System);

    // 12,000 course with a 2,000 admission discount
    let enrollment = ChargeableEnrollment::builder()
        .student_id("STU-0001")
        .course_name("JEE Advanced 2025")
        .course_fees(Money::from_major(12_000))
        .admission_discount(Money::from_major(2_000))
        .build()?;

    let mut ledger = Ledger::open(enrollment, LedgerConfig::standard(), &time)?;

    ledger.record_payment(PaymentProposal::cash(Money::from_major(4_000)), &time)?;
    ledger.record_payment(
        PaymentProposal::new(Money::from_major(3_000), PaymentMethod::Upi)
            .discount(Money::from_major(1_000))
            .transaction_id("UPI-2024-77812"),
        &time,
    )?;

    let status = ledger.status();
    println!("total due: {}", status.total_due);
    println!("total paid: {}", status.total_paid);
    println!("balance: {}", status.balance);
    println!("fully paid: {}", status.is_fully_paid);
    println!("{}", ledger.json());

    Ok(())
}
