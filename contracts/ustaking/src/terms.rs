use soroban_sdk::contracttype;

// Constants
pub const TOKEN_UNIT: i128 = 1_000_000_000_000_000_000; // 18 decimals
pub const BASIS_POINTS: i128 = 10_000;
/// Per-second reward rates are expressed against this denominator.
pub const RATE_DENOMINATOR: i128 = 100_000_000_000;

pub const ONE_DAY: u64 = 86_400;

pub const CASH_BACK_BPS: i128 = 200; // 2%

/// Economic terms selected by a stake type
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeTerms {
    /// Seconds before the principal can be withdrawn
    pub lock_period: u64,
    /// Yield budget paid through `claim` (basis points of principal)
    pub yield_bps: i128,
    /// One-time cashback (basis points of principal)
    pub cash_back_bps: i128,
    /// Smallest accepted principal
    pub min_amount: i128,
}

impl StakeTerms {
    /// Uplift minted into the ledger at stake time, in basis points
    pub fn bonus_bps(&self) -> i128 {
        self.yield_bps + self.cash_back_bps
    }

    /// Yield per second per unit of principal, scaled by `RATE_DENOMINATOR`
    ///
    /// 30% over 180 days gives 1929, i.e. 0.00000001929 per second.
    pub fn reward_rate(&self) -> i128 {
        self.yield_bps * (RATE_DENOMINATOR / BASIS_POINTS) / self.lock_period as i128
    }
}

/// Terms table. Returns `None` for anything outside 1..=3.
pub fn stake_terms(stake_type: u32) -> Option<StakeTerms> {
    let (days, yield_bps, min_units) = match stake_type {
        1 => (180, 3_000, 10),
        2 => (270, 4_500, 50),
        3 => (360, 6_000, 100),
        _ => return None,
    };

    Some(StakeTerms {
        lock_period: days * ONE_DAY,
        yield_bps,
        cash_back_bps: CASH_BACK_BPS,
        min_amount: min_units * TOKEN_UNIT,
    })
}
