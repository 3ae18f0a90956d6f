/// clamping - how the input guard constrains proposed payments
use fee_ledger_rs::{clamp_proposed_payment, compute_status, Money, ProposedAmounts};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== payment input guard ===\n");

    let status = compute_status(Money::from_major(300), &[]);
    println!("outstanding balance: {}\n", status.balance);

    let proposed = |amount, discount| {
        ProposedAmounts::new(Money::from_major(amount), Money::from_major(discount))
    };
    let proposals = [
        ("within balance", proposed(250, 50)),
        ("amount above balance", proposed(500, 0)),
        ("discount above amount", proposed(200, 250)),
        ("both above balance", proposed(500, 400)),
    ];

    for (label, proposed) in proposals {
        let outcome = clamp_proposed_payment(proposed, &status);
        println!(
            "{label}: amount {} discount {} -> amount {} discount {}",
            proposed.amount, proposed.discount, outcome.amounts.amount, outcome.amounts.discount
        );
        if let Some(warning) = outcome.warning {
            println!("  warning: {warning}");
        }
    }
}
