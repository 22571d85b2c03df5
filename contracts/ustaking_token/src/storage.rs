use soroban_sdk::{contracttype, Address};

pub const DECIMALS: u32 = 18;
pub const TOKEN_UNIT: i128 = 1_000_000_000_000_000_000;
pub const INITIAL_SUPPLY: i128 = 79_000_000 * TOKEN_UNIT;
pub const MAX_SUPPLY: i128 = 100_000_000 * TOKEN_UNIT;

pub const NAME: &str = "uStaking";
pub const SYMBOL: &str = "uSTK";

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub struct AllowanceDataKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Minter(Address),
    Balance(Address),
    Allowance(AllowanceDataKey),
    TotalSupply,
    Initialized,
}
