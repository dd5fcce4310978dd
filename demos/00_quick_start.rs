/// quick start - derive a schedule and classify a contract
use chrono::NaiveDate;
use rent_ledger_rs::{
    classify_contract, classify_period, compute_periods, Contract, Money, PaymentCycle,
    PaymentRecord,
};

fn main() {
    let mut contract = Contract::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        Money::from_major(20_000),
        PaymentCycle::Monthly,
    );
    contract.payment_due_day = Some(5);

    // the tenant paid January on time
    contract.payment_records.push(PaymentRecord::confirmed(
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        Money::from_major(20_000),
        "transfer",
    ));

    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    for period in compute_periods(&contract, today) {
        let status = classify_period(&period, today);
        println!(
            "period {} {} ~ {} due {} amount {} -> {:?}",
            period.period_number,
            period.start_date,
            period.end_date,
            period.due_date,
            period.amount,
            status.kind,
        );
    }

    let status = classify_contract(&contract, today);
    println!("contract status: {:?} ({:?})", status.kind, status.severity);
}
