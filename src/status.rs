use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::anomaly::has_amount_mismatch;
use crate::contract::Contract;
use crate::errors::LedgerError;
use crate::schedule::{compute_periods, RentPeriod};
use crate::types::{
    ContractId, ContractStatus, PaymentCycle, PeriodStatus, PeriodStatusKind, StatusKind,
};

/// days before the contract end within which it counts as expiring
const EXPIRY_WARNING_DAYS: i64 = 30;

/// derive the contract-level status, first matching rule wins:
/// expired, expiring soon, payment anomaly, cycle-specific due check, normal
pub fn classify_contract(contract: &Contract, today: NaiveDate) -> ContractStatus {
    if let Some(end) = contract.end_date {
        if today > end {
            return ContractStatus::new(StatusKind::Expired);
        }
        let days_left = (end - today).num_days();
        if (0..=EXPIRY_WARNING_DAYS).contains(&days_left) {
            return ContractStatus::new(StatusKind::ExpiringSoon);
        }
    }

    if has_amount_mismatch(contract) {
        return ContractStatus::new(StatusKind::PaymentAnomaly);
    }

    let kind = match contract.payment_cycle {
        PaymentCycle::Annually => annual_due_check(contract, today),
        _ => periodic_due_check(contract, today),
    };
    ContractStatus::new(kind)
}

/// validating variant for batch use; a structurally broken contract yields
/// an error instead of a status, so one bad record cannot poison a list view
pub fn classify_contract_checked(
    contract: &Contract,
    today: NaiveDate,
) -> Result<ContractStatus, LedgerError> {
    contract.validate()?;
    Ok(classify_contract(contract, today))
}

/// one classified entry of a batch run
#[derive(Debug)]
pub struct ClassifiedContract {
    pub contract_id: ContractId,
    pub status: Result<ContractStatus, LedgerError>,
}

/// classify a whole portfolio, capturing "today" exactly once so every
/// contract in the batch sees the same calendar date
pub fn classify_batch(contracts: &[Contract], time: &SafeTimeProvider) -> Vec<ClassifiedContract> {
    let today = time.now().date_naive();
    contracts
        .iter()
        .map(|contract| ClassifiedContract {
            contract_id: contract.id,
            status: classify_contract_checked(contract, today),
        })
        .collect()
}

/// derive the display status of a single matched period
pub fn classify_period(period: &RentPeriod, today: NaiveDate) -> PeriodStatus {
    let kind = match &period.matched_payment {
        Some(payment) => {
            if payment.amount.within_tolerance_of(period.amount) {
                PeriodStatusKind::Paid
            } else {
                PeriodStatusKind::PaymentAnomaly
            }
        }
        None => {
            if today > period.due_date {
                PeriodStatusKind::PaymentDue
            } else {
                PeriodStatusKind::NotYetDue
            }
        }
    };
    PeriodStatus::new(kind)
}

/// due check for annual contracts: driven by the configured schedule
fn annual_due_check(contract: &Contract, today: NaiveDate) -> StatusKind {
    let periods = compute_periods(contract, today);
    let unmatched_past_due = periods
        .iter()
        .any(|p| !p.is_paid && today > p.due_date);
    if unmatched_past_due {
        return StatusKind::PaymentDue;
    }
    let unmatched_future = periods
        .iter()
        .any(|p| !p.is_paid && p.due_date >= today);
    if unmatched_future {
        return StatusKind::NotYetDue;
    }
    StatusKind::Normal
}

/// due check for monthly/quarterly/semiannual contracts
fn periodic_due_check(contract: &Contract, today: NaiveDate) -> StatusKind {
    let periods = compute_periods(contract, today);

    // any ended period still unpaid is overdue, regardless of due day
    if periods.iter().any(|p| p.has_ended(today) && !p.is_paid) {
        return StatusKind::PaymentDue;
    }

    // otherwise the current period, or the nearest future unpaid one,
    // decides between not-yet-due and due
    let current_or_next = periods
        .iter()
        .find(|p| p.contains(today))
        .or_else(|| periods.iter().find(|p| p.start_date > today && !p.is_paid));

    match current_or_next {
        Some(period) if !period.is_paid => {
            if today > period.due_date {
                StatusKind::PaymentDue
            } else {
                StatusKind::NotYetDue
            }
        }
        _ => StatusKind::Normal,
    }
}

/// serializable mirror of a batch entry for host applications that render
/// partial failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReportEntry {
    pub contract_id: ContractId,
    pub status: Option<ContractStatus>,
    pub error: Option<String>,
}

impl From<&ClassifiedContract> for BatchReportEntry {
    fn from(entry: &ClassifiedContract) -> Self {
        match &entry.status {
            Ok(status) => Self {
                contract_id: entry.contract_id,
                status: Some(*status),
                error: None,
            },
            Err(err) => Self {
                contract_id: entry.contract_id,
                status: None,
                error: Some(err.to_string()),
            },
        }
    }
}
