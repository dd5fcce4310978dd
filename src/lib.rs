pub mod anomaly;
pub mod calendar;
pub mod contract;
pub mod decimal;
pub mod errors;
pub mod schedule;
pub mod status;
pub mod types;

// re-export key types
pub use anomaly::has_amount_mismatch;
pub use contract::{AnnualScheduleEntry, Contract, PaymentRecord, DEFAULT_PAYMENT_DUE_DAY};
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use schedule::{
    auto_match_back_payments, compute_periods, generate_periods, match_payments, RentPeriod,
    MAX_PERIODS,
};
pub use status::{
    classify_batch, classify_contract, classify_contract_checked, classify_period,
    BatchReportEntry, ClassifiedContract,
};
pub use types::{
    ContractId, ContractStatus, PaymentCycle, PaymentId, PeriodStatus, PeriodStatusKind, Severity,
    StatusKind,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
