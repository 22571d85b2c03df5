use crate::storage::StakeRecord;
use crate::terms::{StakeTerms, BASIS_POINTS, RATE_DENOMINATOR};

/// Uplift minted into the ledger when a stake is created
///
/// Formula: uplift = amount × (yield_bps + cash_back_bps) / 10,000
///
/// Example:
/// - amount: 1,000, type 1 (30% yield + 2% cashback)
/// - uplift: 320, so the ledger receives 1,320 in total
pub fn calculate_uplift(amount: i128, terms: &StakeTerms) -> Option<i128> {
    amount
        .checked_mul(terms.bonus_bps())?
        .checked_div(BASIS_POINTS)
}

/// Formula: cash_back = amount × cash_back_bps / 10,000
pub fn calculate_cash_back(amount: i128, terms: &StakeTerms) -> Option<i128> {
    amount
        .checked_mul(terms.cash_back_bps)?
        .checked_div(BASIS_POINTS)
}

/// Total yield a stake can ever pay through `claim`
pub fn calculate_yield_budget(amount: i128, terms: &StakeTerms) -> Option<i128> {
    amount.checked_mul(terms.yield_bps)?.checked_div(BASIS_POINTS)
}

/// Yield accrued since creation, linear per second and capped by the budget
///
/// Once the lock period has elapsed the full budget is accrued, even where
/// the rounded-down rate would still fall a little short of it.
pub fn calculate_accrued(record: &StakeRecord, terms: &StakeTerms, now: u64) -> Option<i128> {
    let budget = calculate_yield_budget(record.amount, terms)?;

    let elapsed = now.saturating_sub(record.created_at);
    if elapsed >= terms.lock_period {
        return Some(budget);
    }

    let linear = record
        .amount
        .checked_mul(terms.reward_rate())?
        .checked_mul(elapsed as i128)?
        .checked_div(RATE_DENOMINATOR)?;

    Some(linear.min(budget))
}

/// Yield that `claim` would pay right now
pub fn calculate_pending(record: &StakeRecord, terms: &StakeTerms, now: u64) -> Option<i128> {
    let accrued = calculate_accrued(record, terms, now)?;
    Some(accrued.checked_sub(record.claimed)?.max(0))
}
