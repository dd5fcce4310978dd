use crate::contract::Contract;
use crate::decimal::Money;
use crate::types::PaymentCycle;

/// check whether confirmed payments diverge from the expected cycle amount
///
/// quarterly, semiannual and annual cycles compare the confirmed total
/// against the cycle's expected total; monthly contracts expect payments
/// 1:1 with the rent, so any single divergent payment flags the contract.
/// All comparisons carry the 1-unit rounding allowance.
pub fn has_amount_mismatch(contract: &Contract) -> bool {
    let confirmed: Vec<_> = contract
        .payment_records
        .iter()
        .filter(|pr| pr.is_confirmed)
        .collect();
    if confirmed.is_empty() {
        return false;
    }

    match contract.payment_cycle {
        PaymentCycle::Monthly => confirmed
            .iter()
            .any(|pr| !pr.amount.within_tolerance_of(contract.rent_amount)),
        PaymentCycle::Quarterly | PaymentCycle::Semiannually | PaymentCycle::Annually => {
            let total: Money = confirmed.iter().map(|pr| pr.amount).sum();
            !total.within_tolerance_of(contract.expected_cycle_total())
        }
    }
}
