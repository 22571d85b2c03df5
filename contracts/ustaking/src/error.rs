use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller is not the admin
    Unauthorized = 10,
    /// Address cannot be used as referral wallet
    InvalidAddress = 11,

    // ============================================
    // STAKE ERRORS (20-29)
    // ============================================
    /// Stake type is not 1, 2 or 3
    InvalidStakeType = 20,
    /// Amount is below the minimum for the stake type
    BelowMinimumStake = 21,
    /// Stake does not exist or belongs to another address
    InvalidStakeId = 22,

    // ============================================
    // LIFECYCLE ERRORS (30-39)
    // ============================================
    /// Cashback already paid for this stake
    AlreadyClaimed = 30,
    /// Principal already withdrawn
    AlreadyWithdrawn = 31,
    /// Lock period has not elapsed
    LockNotExpired = 32,

    // ============================================
    // AMOUNT/BALANCE ERRORS (40-49)
    // ============================================
    /// Ledger is not approved to pull the amount
    InsufficientAllowance = 40,
    /// Staker does not hold the amount
    InsufficientBalance = 41,
    /// Amount must be positive
    InvalidAmount = 42,
    /// Arithmetic overflow
    MathOverflow = 43,

    // ============================================
    // OPERATIONAL ERRORS (60-69)
    // ============================================
    /// Contract is paused
    ContractPaused = 60,
}
