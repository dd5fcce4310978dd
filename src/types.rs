use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a contract
pub type ContractId = Uuid;

/// unique identifier for a payment record
pub type PaymentId = Uuid;

/// rent collection frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentCycle {
    Monthly,
    Quarterly,
    Semiannually,
    Annually,
}

impl PaymentCycle {
    /// calendar months spanned by one billing period
    pub fn months_per_period(&self) -> u32 {
        match self {
            PaymentCycle::Monthly => 1,
            PaymentCycle::Quarterly => 3,
            PaymentCycle::Semiannually => 6,
            PaymentCycle::Annually => 12,
        }
    }

    /// expected total collected per cycle, from the monthly base rent
    ///
    /// annual contracts with the half-month discount collect 11.5 months of
    /// rent instead of 12; the discount flag is ignored for other cycles
    pub fn expected_cycle_total(&self, rent_amount: Money, annual_discount: bool) -> Money {
        match self {
            PaymentCycle::Monthly => rent_amount,
            PaymentCycle::Quarterly => rent_amount * dec!(3),
            PaymentCycle::Semiannually => rent_amount * dec!(6),
            PaymentCycle::Annually => {
                if annual_discount {
                    rent_amount * dec!(11.5)
                } else {
                    rent_amount * dec!(12)
                }
            }
        }
    }
}

/// severity attached to a derived status, for callers to rank or style
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Ok,
    Info,
    Warning,
    Danger,
}

/// contract-level status taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    /// contract end date has passed
    Expired,
    /// contract ends within 30 days
    ExpiringSoon,
    /// confirmed payment totals diverge from the expected cycle amount
    PaymentAnomaly,
    /// an unpaid period is past due
    PaymentDue,
    /// next payment exists but its due date is still ahead
    NotYetDue,
    /// nothing outstanding
    Normal,
}

impl StatusKind {
    pub fn severity(&self) -> Severity {
        match self {
            StatusKind::Expired | StatusKind::PaymentAnomaly => Severity::Danger,
            StatusKind::ExpiringSoon | StatusKind::PaymentDue => Severity::Warning,
            StatusKind::NotYetDue => Severity::Info,
            StatusKind::Normal => Severity::Ok,
        }
    }
}

/// derived contract status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStatus {
    pub kind: StatusKind,
    pub severity: Severity,
}

impl ContractStatus {
    pub fn new(kind: StatusKind) -> Self {
        Self {
            kind,
            severity: kind.severity(),
        }
    }
}

/// per-period status taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodStatusKind {
    /// matched payment within tolerance of the expected amount
    Paid,
    /// matched payment diverges from the expected amount
    PaymentAnomaly,
    /// unpaid, due date still ahead
    NotYetDue,
    /// unpaid, due date has passed
    PaymentDue,
}

impl PeriodStatusKind {
    pub fn severity(&self) -> Severity {
        match self {
            PeriodStatusKind::Paid => Severity::Ok,
            PeriodStatusKind::PaymentAnomaly => Severity::Danger,
            PeriodStatusKind::NotYetDue => Severity::Info,
            PeriodStatusKind::PaymentDue => Severity::Warning,
        }
    }
}

/// derived period status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatus {
    pub kind: PeriodStatusKind,
    pub severity: Severity,
}

impl PeriodStatus {
    pub fn new(kind: PeriodStatusKind) -> Self {
        Self {
            kind,
            severity: kind.severity(),
        }
    }
}
