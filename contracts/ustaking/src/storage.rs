use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::error::Error;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    /// Global, 1-based stake identifier
    pub id: u64,
    /// Address that created the stake
    pub owner: Address,
    /// Selects the `StakeTerms`
    pub stake_type: u32,
    /// Principal deposited
    pub amount: i128,
    /// Ledger timestamp at creation
    pub created_at: u64,
    /// Set once the cashback has been paid
    pub cash_back_claimed: bool,
    /// Set once the principal has been returned
    pub withdrawn: bool,
    /// Yield paid out through `claim` so far
    pub claimed: i128,
}

/// Ledger-wide accounting
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Totals {
    /// Principal currently locked
    pub total_staked: i128,
    /// Uplift minted into the ledger across all stakes
    pub total_uplift_minted: i128,
    pub total_cash_back_paid: i128,
    pub total_rewards_paid: i128,
    /// Principal returned through `withdraw`
    pub total_withdrawn: i128,
    pub stake_count: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    RefWallet,
    LastStakeId,
    Totals,
    Stake(u64),
    UserStakes(Address),
    Initialized,
    Paused,
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// Config

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn get_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

pub fn get_ref_wallet(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::RefWallet)
        .ok_or(Error::NotInitialized)
}

pub fn set_ref_wallet(env: &Env, wallet: &Address) {
    env.storage().instance().set(&DataKey::RefWallet, wallet);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

// Stake id counter

/// Claims the next stake id. Ids start at 1 and are never handed out twice.
pub fn next_stake_id(env: &Env) -> Result<u64, Error> {
    let last: u64 = env
        .storage()
        .instance()
        .get(&DataKey::LastStakeId)
        .unwrap_or(0);
    let id = last.checked_add(1).ok_or(Error::MathOverflow)?;
    env.storage().instance().set(&DataKey::LastStakeId, &id);
    Ok(id)
}

// Stake records

pub fn get_stake(env: &Env, stake_id: u64) -> Option<StakeRecord> {
    let key = DataKey::Stake(stake_id);
    let record = env.storage().persistent().get::<DataKey, StakeRecord>(&key);
    if record.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    record
}

/// Loads a stake only if `user` owns it; foreign and unknown ids look the same.
pub fn get_owned_stake(env: &Env, user: &Address, stake_id: u64) -> Result<StakeRecord, Error> {
    match get_stake(env, stake_id) {
        Some(record) if record.owner == *user => Ok(record),
        _ => Err(Error::InvalidStakeId),
    }
}

pub fn set_stake(env: &Env, record: &StakeRecord) {
    let key = DataKey::Stake(record.id);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// Per-owner index

pub fn get_user_stakes(env: &Env, user: &Address) -> Vec<u64> {
    let key = DataKey::UserStakes(user.clone());
    match env.storage().persistent().get::<DataKey, Vec<u64>>(&key) {
        Some(ids) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
            ids
        }
        None => Vec::new(env),
    }
}

pub fn push_user_stake(env: &Env, user: &Address, stake_id: u64) {
    let key = DataKey::UserStakes(user.clone());
    let mut ids = get_user_stakes(env, user);
    ids.push_back(stake_id);
    env.storage().persistent().set(&key, &ids);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// Accounting

pub fn get_totals(env: &Env) -> Totals {
    env.storage()
        .instance()
        .get::<DataKey, Totals>(&DataKey::Totals)
        .unwrap_or(Totals {
            total_staked: 0,
            total_uplift_minted: 0,
            total_cash_back_paid: 0,
            total_rewards_paid: 0,
            total_withdrawn: 0,
            stake_count: 0,
        })
}

pub fn set_totals(env: &Env, totals: &Totals) {
    env.storage().instance().set(&DataKey::Totals, totals);
}
