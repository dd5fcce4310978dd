mod matching;
mod periods;

pub use matching::{auto_match_back_payments, match_payments};
pub use periods::{compute_periods, generate_periods, RentPeriod, MAX_PERIODS};
