/// late fees - a pinned clock, a late fee policy and the event log
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use fee_ledger_rs::{
    ChargeableEnrollment, Ledger, LedgerConfig, Money, PaymentMethod, PaymentProposal,
};
use fee_ledger_rs::{SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let due_date = NaiveDate::from_ymd_opt(2024, 7, 10).ok_or("invalid due date")?;
    let enrollment = ChargeableEnrollment::builder()
        .student_id("STU-0315")
        .course_name("Class XII Physics")
        .course_fees(Money::from_major(18_000))
        .fee_due_date(due_date)
        .build()?;

    let config = LedgerConfig::flat_late_fee(Money::from_major(300), 5);
    let mut ledger = Ledger::open(enrollment, config, &time)?;

    ledger.record_payment(PaymentProposal::cash(Money::from_major(6_000)), &time)?;

    // three weeks later, past the grace period
    controller.advance(Duration::days(21));
    let late = ledger.record_payment(
        PaymentProposal::new(Money::from_major(6_000), PaymentMethod::Card),
        &time,
    )?;
    println!("late fee charged: {}", late.record.late_fee);
    println!("balance after: {}", late.status.balance);

    // the guard clamps this to the remaining 6,000
    let last = ledger.record_payment(
        PaymentProposal::new(Money::from_major(7_500), PaymentMethod::BankTransfer)
            .transaction_id("NEFT-99031"),
        &time,
    )?;
    if let Some(warning) = last.warning {
        println!("warning: {warning}");
    }

    println!("\nevents:");
    for event in ledger.take_events() {
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
