use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::contract::{Contract, PaymentRecord};
use crate::decimal::Money;
use crate::types::{PaymentCycle, PaymentId};

use super::periods::RentPeriod;

/// days either side of an annual schedule date within which a payment counts
const ANNUAL_MATCH_WINDOW_DAYS: i64 = 30;

/// reconcile a period schedule against the contract's payment history
///
/// runs as a fold over the periods in ascending order, producing a new
/// annotated list plus a consumed-payment set; the oldest unpaid period
/// always gets first claim on a back payment. Only confirmed records with a
/// positive amount participate.
pub fn match_payments(
    periods: Vec<RentPeriod>,
    contract: &Contract,
    today: NaiveDate,
) -> Vec<RentPeriod> {
    if contract.payment_cycle == PaymentCycle::Annually {
        return match_annual(periods, contract);
    }

    let confirmed: Vec<&PaymentRecord> = contract.confirmed_payments().collect();
    let rent = contract.rent_amount;
    let mut used: HashSet<PaymentId> = HashSet::new();
    let mut match_counts: HashMap<PaymentId, u32> = HashMap::new();

    periods
        .into_iter()
        .map(|mut period| {
            // a payment dated inside the period satisfies it directly
            let mut chosen = confirmed
                .iter()
                .find(|p| !used.contains(&p.id) && period.contains(p.payment_date))
                .copied();

            // an ended period can instead be covered by a later back payment
            // whose unallocated remainder still reaches the period amount
            if chosen.is_none() && period.has_ended(today) {
                chosen = confirmed
                    .iter()
                    .find(|p| {
                        if used.contains(&p.id) || p.payment_date <= period.end_date {
                            return false;
                        }
                        let capacity = coverage_capacity(p, rent);
                        let matched = match_counts.get(&p.id).copied().unwrap_or(0);
                        if matched >= capacity {
                            return false;
                        }
                        let remaining = p.amount - rent * Decimal::from(matched);
                        remaining >= period.amount - Money::TOLERANCE
                    })
                    .copied();
            }

            if let Some(payment) = chosen {
                let count = match_counts.entry(payment.id).or_insert(0);
                *count += 1;
                // retire the payment once it has covered every period it can
                if *count >= coverage_capacity(payment, rent) {
                    used.insert(payment.id);
                }
                period.is_paid = true;
                period.matched_payment = Some(payment.clone());
            }

            period
        })
        .collect()
}

/// annual contracts match each schedule entry to one payment close to its
/// date (30-day window) and within tolerance of its amount
fn match_annual(periods: Vec<RentPeriod>, contract: &Contract) -> Vec<RentPeriod> {
    let confirmed: Vec<&PaymentRecord> = contract.confirmed_payments().collect();
    let mut used: HashSet<PaymentId> = HashSet::new();

    periods
        .into_iter()
        .map(|mut period| {
            let chosen = confirmed.iter().find(|p| {
                !used.contains(&p.id)
                    && (p.payment_date - period.due_date).num_days().abs()
                        <= ANNUAL_MATCH_WINDOW_DAYS
                    && p.amount.within_tolerance_of(period.amount)
            });
            if let Some(payment) = chosen {
                used.insert(payment.id);
                period.is_paid = true;
                period.matched_payment = Some((*payment).clone());
            }
            period
        })
        .collect()
}

/// greedily apply a newly recorded payment to the oldest unpaid past periods
///
/// returns the periods the payment satisfies, for user-facing confirmation;
/// the match commits only when the payment is consumed whole (leftover within
/// tolerance). The candidate record is excluded from the baseline schedule,
/// so the result is the same whether or not the caller already appended it to
/// the contract.
pub fn auto_match_back_payments(
    contract: &Contract,
    new_payment: &PaymentRecord,
    today: NaiveDate,
) -> Vec<RentPeriod> {
    if contract.payment_cycle == PaymentCycle::Annually {
        return Vec::new();
    }
    if !new_payment.is_confirmed || !new_payment.amount.is_positive() {
        return Vec::new();
    }

    let mut baseline = contract.clone();
    baseline.payment_records.retain(|pr| pr.id != new_payment.id);

    let mut unpaid_past: Vec<RentPeriod> = super::compute_periods(&baseline, today)
        .into_iter()
        .filter(|p| p.has_ended(today) && !p.is_paid)
        .collect();
    if unpaid_past.is_empty() {
        return Vec::new();
    }

    let mut matched = Vec::new();
    let mut remaining = new_payment.amount;
    for period in unpaid_past.drain(..) {
        if remaining >= period.amount - Money::TOLERANCE {
            remaining -= period.amount;
            matched.push(period);
        } else {
            break;
        }
    }

    // commit only when the payment was consumed whole
    if remaining.abs() <= Money::TOLERANCE && !matched.is_empty() {
        for period in &mut matched {
            period.is_paid = true;
            period.matched_payment = Some(new_payment.clone());
        }
        matched
    } else {
        Vec::new()
    }
}

/// how many periods a payment can cover, with the 1-unit rounding allowance
fn coverage_capacity(payment: &PaymentRecord, rent: Money) -> u32 {
    if !rent.is_positive() {
        return 0;
    }
    ((payment.amount + Money::ONE).as_decimal() / rent.as_decimal())
        .floor()
        .to_u32()
        .unwrap_or(0)
}
