/// json state - contracts round-trip through the host's persistence layer
use chrono::{TimeZone, Utc};
use rent_ledger_rs::{classify_batch, Contract, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let json = r#"{
        "id": "7f6b2a44-9c1d-4a1e-b0a5-3d2f8e9c1b7a",
        "start_date": "2025-01-01",
        "end_date": "2025-12-31",
        "rent_amount": "30000",
        "payment_cycle": "Quarterly",
        "payment_due_day": 10,
        "payment_records": [
            {
                "id": "f0e9d8c7-b6a5-4f3e-9d2c-1b0a9f8e7d6c",
                "payment_date": "2025-01-08",
                "amount": "90000",
                "method": "transfer",
                "is_confirmed": true
            }
        ]
    }"#;

    let contract: Contract = serde_json::from_str(json)?;
    println!("expected per cycle: {}", contract.expected_cycle_total());

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
    ));
    for entry in classify_batch(std::slice::from_ref(&contract), &time) {
        match entry.status {
            Ok(status) => println!("{}: {:?}", entry.contract_id, status.kind),
            Err(err) => println!("{}: failed: {err}", entry.contract_id),
        }
    }

    println!("{}", serde_json::to_string_pretty(&contract)?);
    Ok(())
}
