/// back payments - one late transfer settling several overdue periods
use chrono::NaiveDate;
use rent_ledger_rs::{auto_match_back_payments, compute_periods, Contract, Money, PaymentCycle, PaymentRecord};

fn main() {
    let contract = Contract::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        Money::from_major(20_000),
        PaymentCycle::Monthly,
    );

    // three months behind, then a single catch-up transfer in April
    let catch_up = PaymentRecord::confirmed(
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        Money::from_major(60_000),
        "transfer",
    );
    let today = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();

    // preview which periods the transfer would settle, before saving it
    let matched = auto_match_back_payments(&contract, &catch_up, today);
    let total: Money = matched.iter().map(|p| p.amount).sum();
    println!("transfer of {} settles {} periods (total {total}):", catch_up.amount, matched.len());
    for period in &matched {
        println!("  period {} ({} ~ {})", period.period_number, period.start_date, period.end_date);
    }

    // after saving, the full reconciliation pass reaches the same result
    let mut saved = contract.clone();
    saved.payment_records.push(catch_up.clone());
    let settled = compute_periods(&saved, today)
        .into_iter()
        .filter(|p| p.matched_payment_id() == Some(catch_up.id))
        .count();
    println!("reconciliation attributes {settled} periods to the transfer");
}
