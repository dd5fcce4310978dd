use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{ContractId, PaymentCycle, PaymentId};

/// default due day when a contract does not set one
pub const DEFAULT_PAYMENT_DUE_DAY: u32 = 1;

/// a recorded rent payment
///
/// only confirmed records participate in matching and reconciliation;
/// unconfirmed ones are bookkeeping drafts kept by the host application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub payment_date: NaiveDate,
    pub amount: Money,
    /// free-text payment method, e.g. "transfer", "cash"
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub is_confirmed: bool,
}

impl PaymentRecord {
    pub fn confirmed(payment_date: NaiveDate, amount: Money, method: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_date,
            amount,
            method: method.into(),
            is_confirmed: true,
        }
    }
}

/// one entry of an annual contract's configured payment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualScheduleEntry {
    pub date: NaiveDate,
    pub amount: Money,
}

/// a lease contract, owned by the surrounding record-keeping layer
///
/// the core reads this and derives periods and statuses; it never mutates it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    /// inclusive term boundaries; either may be absent while a contract is
    /// still being drafted, in which case no schedule can be derived
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// monthly base rent regardless of billing cycle
    pub rent_amount: Money,
    pub payment_cycle: PaymentCycle,
    /// annual contracts with this flag collect 11.5 months instead of 12
    #[serde(default)]
    pub annual_discount: bool,
    /// due day of month (1-31) for non-annual cycles, clamped per month
    #[serde(default)]
    pub payment_due_day: Option<u32>,
    /// configured payment schedule, used only by annual contracts
    #[serde(default)]
    pub annual_payment_dates: Vec<AnnualScheduleEntry>,
    #[serde(default)]
    pub payment_records: Vec<PaymentRecord>,
}

impl Contract {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        rent_amount: Money,
        payment_cycle: PaymentCycle,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date: Some(start_date),
            end_date: Some(end_date),
            rent_amount,
            payment_cycle,
            annual_discount: false,
            payment_due_day: None,
            annual_payment_dates: Vec::new(),
            payment_records: Vec::new(),
        }
    }

    /// due day of month, defaulting to the 1st
    pub fn due_day(&self) -> u32 {
        self.payment_due_day.unwrap_or(DEFAULT_PAYMENT_DUE_DAY)
    }

    /// confirmed payment records with a positive amount, in record order
    pub fn confirmed_payments(&self) -> impl Iterator<Item = &PaymentRecord> {
        self.payment_records
            .iter()
            .filter(|pr| pr.is_confirmed && pr.amount.is_positive())
    }

    /// look up a payment record by id
    pub fn payment(&self, id: PaymentId) -> Option<&PaymentRecord> {
        self.payment_records.iter().find(|pr| pr.id == id)
    }

    /// expected total collected per billing cycle
    pub fn expected_cycle_total(&self) -> Money {
        self.payment_cycle
            .expected_cycle_total(self.rent_amount, self.annual_discount)
    }

    /// check structural soundness before classification
    pub fn validate(&self) -> Result<()> {
        if !self.rent_amount.is_positive() {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("rent amount must be positive, got {}", self.rent_amount),
            });
        }
        if let Some(day) = self.payment_due_day {
            if !(1..=31).contains(&day) {
                return Err(LedgerError::InvalidConfiguration {
                    message: format!("payment due day must be 1-31, got {day}"),
                });
            }
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(LedgerError::InvalidDate {
                    message: format!("start date {start} is after end date {end}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn base_contract() -> Contract {
        Contract::new(
            d(2025, 1, 1),
            d(2025, 12, 31),
            Money::from_major(20_000),
            PaymentCycle::Monthly,
        )
    }

    #[test]
    fn test_confirmed_payments_filter() {
        let mut contract = base_contract();
        contract.payment_records = vec![
            PaymentRecord::confirmed(d(2025, 1, 3), Money::from_major(20_000), "transfer"),
            PaymentRecord {
                is_confirmed: false,
                ..PaymentRecord::confirmed(d(2025, 2, 3), Money::from_major(20_000), "cash")
            },
            PaymentRecord::confirmed(d(2025, 3, 3), Money::ZERO, "transfer"),
        ];
        assert_eq!(contract.confirmed_payments().count(), 1);
    }

    #[test]
    fn test_due_day_default() {
        let mut contract = base_contract();
        assert_eq!(contract.due_day(), 1);
        contract.payment_due_day = Some(5);
        assert_eq!(contract.due_day(), 5);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let mut contract = base_contract();
        contract.rent_amount = Money::ZERO;
        assert!(contract.validate().is_err());

        let mut contract = base_contract();
        contract.payment_due_day = Some(40);
        assert!(contract.validate().is_err());

        let mut contract = base_contract();
        contract.start_date = Some(d(2026, 1, 1));
        assert!(contract.validate().is_err());

        assert!(base_contract().validate().is_ok());
    }

    #[test]
    fn test_serde_round_trip_with_defaults() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "start_date": "2025-01-01",
            "end_date": "2025-12-31",
            "rent_amount": "20000",
            "payment_cycle": "Monthly",
        });
        let contract: Contract = serde_json::from_value(json).unwrap();
        assert_eq!(contract.due_day(), 1);
        assert!(contract.payment_records.is_empty());
        assert!(!contract.annual_discount);

        let text = serde_json::to_string(&contract).unwrap();
        let back: Contract = serde_json::from_str(&text).unwrap();
        assert_eq!(back, contract);
    }
}
