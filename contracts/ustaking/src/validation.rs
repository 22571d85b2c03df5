use soroban_sdk::{log, Address, Env};

use crate::error::Error;
use crate::storage::{self, StakeRecord};
use crate::terms::StakeTerms;

pub fn check_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        log!(env, "uStaking: operation rejected while paused");
        return Err(Error::ContractPaused);
    }
    Ok(())
}

/// Authenticates `caller` and checks it is the stored admin
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();

    let admin = storage::get_admin(env)?;
    if *caller != admin {
        log!(env, "uStaking: non-admin call from {}", caller.clone());
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn validate_stake_amount(env: &Env, amount: i128, terms: &StakeTerms) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if amount < terms.min_amount {
        log!(
            env,
            "uStaking: stake of {} is below minimum {}",
            amount,
            terms.min_amount
        );
        return Err(Error::BelowMinimumStake);
    }
    Ok(())
}

/// The referral wallet may be any account except the ledger and its token
pub fn validate_ref_wallet(env: &Env, wallet: &Address, token: &Address) -> Result<(), Error> {
    if *wallet == env.current_contract_address() || wallet == token {
        return Err(Error::InvalidAddress);
    }
    Ok(())
}

pub fn validate_withdrawal(
    env: &Env,
    record: &StakeRecord,
    terms: &StakeTerms,
    now: u64,
) -> Result<(), Error> {
    let unlock_at = record
        .created_at
        .checked_add(terms.lock_period)
        .ok_or(Error::MathOverflow)?;
    if now < unlock_at {
        log!(
            env,
            "uStaking: stake {} locked until {}",
            record.id,
            unlock_at
        );
        return Err(Error::LockNotExpired);
    }

    if record.withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }
    Ok(())
}
