use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calendar::{
    add_months, date_clamped, half_year_first_month, last_day_of_month, quarter_first_month,
};
use crate::contract::{Contract, PaymentRecord};
use crate::decimal::Money;
use crate::types::{PaymentCycle, PaymentId};

/// hard cap on generated periods, a fail-safe against malformed date input
pub const MAX_PERIODS: usize = 1000;

/// one billing interval of a contract, derived on every query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentPeriod {
    /// 1-based sequential number
    pub period_number: u32,
    pub start_date: NaiveDate,
    /// inclusive; the next period starts the following calendar day
    pub end_date: NaiveDate,
    pub due_date: NaiveDate,
    /// expected payment for this period
    pub amount: Money,
    pub is_paid: bool,
    /// the payment record satisfying this period, once matched
    pub matched_payment: Option<PaymentRecord>,
}

impl RentPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn has_ended(&self, today: NaiveDate) -> bool {
        today > self.end_date
    }

    pub fn matched_payment_id(&self) -> Option<PaymentId> {
        self.matched_payment.as_ref().map(|p| p.id)
    }
}

/// generate the raw billing schedule, without payment matching
///
/// non-annual cycles step through whole calendar months from the contract
/// start; annual cycles emit one period per configured schedule entry, each
/// spanning the entire contract. Missing term dates yield an empty schedule.
pub fn generate_periods(contract: &Contract) -> Vec<RentPeriod> {
    let (Some(start), Some(end)) = (contract.start_date, contract.end_date) else {
        return Vec::new();
    };

    if contract.payment_cycle == PaymentCycle::Annually {
        return annual_periods(contract, start, end);
    }

    let step = contract.payment_cycle.months_per_period();
    let mut periods = Vec::new();
    let mut current = start;

    while current < end {
        // period end is the last day of the month reached by stepping
        // (step - 1) months forward, clipped to the contract end
        let (end_year, end_month) = add_months(current.year(), current.month(), step - 1);
        let period_end = last_day_of_month(end_year, end_month).min(end);

        periods.push(RentPeriod {
            period_number: periods.len() as u32 + 1,
            start_date: current,
            end_date: period_end,
            due_date: due_date_for(contract, current),
            amount: contract.rent_amount,
            is_paid: false,
            matched_payment: None,
        });

        if periods.len() >= MAX_PERIODS {
            warn!(
                contract_id = %contract.id,
                "period cap of {MAX_PERIODS} reached, truncating schedule"
            );
            break;
        }

        let Some(next) = period_end.succ_opt() else {
            break;
        };
        if next <= current {
            warn!(
                contract_id = %contract.id,
                %current,
                %period_end,
                "period start did not advance, truncating schedule"
            );
            break;
        }
        current = next;
    }

    periods
}

/// generate periods and reconcile them against the contract's payment history
pub fn compute_periods(contract: &Contract, today: NaiveDate) -> Vec<RentPeriod> {
    super::match_payments(generate_periods(contract), contract, today)
}

fn annual_periods(contract: &Contract, start: NaiveDate, end: NaiveDate) -> Vec<RentPeriod> {
    contract
        .annual_payment_dates
        .iter()
        .enumerate()
        .map(|(i, entry)| RentPeriod {
            period_number: i as u32 + 1,
            start_date: start,
            end_date: end,
            due_date: entry.date,
            amount: entry.amount,
            is_paid: false,
            matched_payment: None,
        })
        .collect()
}

/// due date for the period starting at `period_start`, clamped to the month
fn due_date_for(contract: &Contract, period_start: NaiveDate) -> NaiveDate {
    let day = contract.due_day();
    let year = period_start.year();
    let month = match contract.payment_cycle {
        PaymentCycle::Monthly => period_start.month(),
        PaymentCycle::Quarterly => quarter_first_month(period_start),
        PaymentCycle::Semiannually => half_year_first_month(period_start),
        // annual periods take their due date from the schedule entry
        PaymentCycle::Annually => period_start.month(),
    };
    date_clamped(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::AnnualScheduleEntry;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn monthly_contract() -> Contract {
        let mut contract = Contract::new(
            d(2025, 1, 1),
            d(2025, 6, 30),
            Money::from_major(20_000),
            PaymentCycle::Monthly,
        );
        contract.payment_due_day = Some(5);
        contract
    }

    #[test]
    fn test_monthly_schedule() {
        let periods = generate_periods(&monthly_contract());
        assert_eq!(periods.len(), 6);
        assert_eq!(periods[0].start_date, d(2025, 1, 1));
        assert_eq!(periods[0].end_date, d(2025, 1, 31));
        assert_eq!(periods[0].due_date, d(2025, 1, 5));
        assert_eq!(periods[2].due_date, d(2025, 3, 5));
        assert_eq!(periods[5].end_date, d(2025, 6, 30));
        assert!(periods.iter().all(|p| p.amount == Money::from_major(20_000)));
        assert!(periods.iter().all(|p| !p.is_paid));
    }

    #[test]
    fn test_contiguity_and_bounds() {
        let mut contract = monthly_contract();
        contract.start_date = Some(d(2024, 11, 15));
        contract.end_date = Some(d(2025, 8, 20));
        let periods = generate_periods(&contract);

        assert_eq!(periods[0].start_date, d(2024, 11, 15));
        for pair in periods.windows(2) {
            assert_eq!(pair[1].start_date, pair[0].end_date.succ_opt().unwrap());
        }
        assert!(periods.last().unwrap().end_date <= d(2025, 8, 20));
    }

    #[test]
    fn test_end_clipped_to_contract() {
        let mut contract = monthly_contract();
        contract.end_date = Some(d(2025, 3, 15));
        let periods = generate_periods(&contract);
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[2].start_date, d(2025, 3, 1));
        assert_eq!(periods[2].end_date, d(2025, 3, 15));
    }

    #[test]
    fn test_quarterly_schedule_and_due_dates() {
        let mut contract = Contract::new(
            d(2025, 2, 10),
            d(2026, 2, 9),
            Money::from_major(30_000),
            PaymentCycle::Quarterly,
        );
        contract.payment_due_day = Some(10);
        let periods = generate_periods(&contract);

        // Feb 10 steps two months forward, ending on the last day of April
        assert_eq!(periods[0].end_date, d(2025, 4, 30));
        // quarter containing Feb 10 begins in January
        assert_eq!(periods[0].due_date, d(2025, 1, 10));
        // second period starts May 1, inside the Apr-Jun quarter
        assert_eq!(periods[1].start_date, d(2025, 5, 1));
        assert_eq!(periods[1].due_date, d(2025, 4, 10));
    }

    #[test]
    fn test_semiannual_due_dates() {
        let contract = Contract::new(
            d(2025, 3, 1),
            d(2026, 2, 28),
            Money::from_major(25_000),
            PaymentCycle::Semiannually,
        );
        let periods = generate_periods(&contract);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].due_date, d(2025, 1, 1));
        assert_eq!(periods[1].start_date, d(2025, 9, 1));
        assert_eq!(periods[1].due_date, d(2025, 7, 1));
    }

    #[test]
    fn test_due_day_clamped_to_short_month() {
        let mut contract = Contract::new(
            d(2025, 2, 1),
            d(2025, 4, 30),
            Money::from_major(20_000),
            PaymentCycle::Monthly,
        );
        contract.payment_due_day = Some(31);
        let periods = generate_periods(&contract);
        assert_eq!(periods[0].due_date, d(2025, 2, 28));
        assert_eq!(periods[1].due_date, d(2025, 3, 31));
        assert_eq!(periods[2].due_date, d(2025, 4, 30));
    }

    #[test]
    fn test_missing_dates_yield_empty_schedule() {
        let mut contract = monthly_contract();
        contract.start_date = None;
        assert!(generate_periods(&contract).is_empty());

        let mut contract = monthly_contract();
        contract.end_date = None;
        assert!(generate_periods(&contract).is_empty());
    }

    #[test]
    fn test_annual_periods_follow_schedule_entries() {
        let mut contract = Contract::new(
            d(2025, 1, 1),
            d(2025, 12, 31),
            Money::from_major(60_000),
            PaymentCycle::Annually,
        );
        contract.annual_payment_dates = vec![
            AnnualScheduleEntry {
                date: d(2025, 1, 15),
                amount: Money::from_major(345_000),
            },
            AnnualScheduleEntry {
                date: d(2025, 7, 15),
                amount: Money::from_major(345_000),
            },
        ];
        let periods = generate_periods(&contract);
        assert_eq!(periods.len(), 2);
        // annual periods span the whole contract, they are never date-stepped
        for period in &periods {
            assert_eq!(period.start_date, d(2025, 1, 1));
            assert_eq!(period.end_date, d(2025, 12, 31));
        }
        assert_eq!(periods[0].due_date, d(2025, 1, 15));
        assert_eq!(periods[1].amount, Money::from_major(345_000));
    }

    #[test]
    fn test_annual_without_schedule_is_empty() {
        let contract = Contract::new(
            d(2025, 1, 1),
            d(2025, 12, 31),
            Money::from_major(60_000),
            PaymentCycle::Annually,
        );
        assert!(generate_periods(&contract).is_empty());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let contract = monthly_contract();
        assert_eq!(generate_periods(&contract), generate_periods(&contract));
    }

    #[test]
    fn test_period_cap() {
        let contract = Contract::new(
            d(1025, 1, 1),
            d(3025, 1, 1),
            Money::from_major(20_000),
            PaymentCycle::Monthly,
        );
        let periods = generate_periods(&contract);
        assert_eq!(periods.len(), MAX_PERIODS);
    }
}
