#![no_std]

mod error;
mod events;
mod rewards;
mod storage;
mod terms;
mod validation;


pub use error::Error;
pub use storage::{StakeRecord, Totals};
pub use terms::{StakeTerms, TOKEN_UNIT};

use events::*;
use rewards::{calculate_cash_back, calculate_pending, calculate_uplift};
use storage::DataKey;
use terms::stake_terms;
use validation::{check_not_paused, require_admin, validate_ref_wallet, validate_stake_amount, validate_withdrawal};

use soroban_sdk::{contract, contractimpl, contractmeta, token, vec, Address, Env, IntoVal, Symbol, Vec};

contractmeta!(key = "Description", val = "Typed-lock staking ledger with cashback and linear yield");

#[contract]
pub struct UStaking;

#[contractimpl]
impl UStaking {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the ledger
    ///
    /// The ledger must be granted the minter role on `token` before the
    /// first stake, since every stake mints its uplift.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidAddress`: `ref_wallet` is the ledger or the token
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        ref_wallet: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        validate_ref_wallet(&env, &ref_wallet, &token)?;

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        storage::set_ref_wallet(&env, &ref_wallet);
        storage::set_paused(&env, false);
        storage::bump_instance(&env);

        Ok(())
    }

    /// Pause every user flow (emergency)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        storage::set_paused(&env, true);
        env.events().publish((Symbol::new(&env, "paused"),), caller);
        Ok(())
    }

    /// Unpause contract
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        storage::set_paused(&env, false);
        env.events().publish((Symbol::new(&env, "unpaused"),), caller);
        Ok(())
    }

    /// Replace the referral wallet
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidAddress`: `new_wallet` is the ledger or the token
    pub fn update_ref_wallet(env: Env, caller: Address, new_wallet: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        let token = storage::get_token(&env)?;
        validate_ref_wallet(&env, &new_wallet, &token)?;

        let old_wallet = storage::get_ref_wallet(&env)?;
        storage::set_ref_wallet(&env, &new_wallet);
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "ref_wallet_updated"),),
            RefWalletUpdatedEvent {
                old_wallet,
                new_wallet,
            },
        );

        Ok(())
    }

    // ============================================
    // USER FLOWS
    // ============================================

    /// Lock `amount` under `stake_type` and return the new stake id
    ///
    /// Pulls `amount` from `user` (requires a prior `approve` on the token
    /// for this ledger) and mints the uplift for cashback and yield into the
    /// ledger.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidStakeType`: `stake_type` is not 1, 2 or 3
    /// - `InvalidAmount`: Amount <= 0
    /// - `BelowMinimumStake`: Amount under the type's minimum
    /// - `InsufficientAllowance`: Ledger not approved for `amount`
    /// - `InsufficientBalance`: `user` holds less than `amount`
    pub fn stake(env: Env, user: Address, stake_type: u32, amount: i128) -> Result<u64, Error> {
        check_not_paused(&env)?;

        user.require_auth();

        let terms = stake_terms(stake_type).ok_or(Error::InvalidStakeType)?;
        validate_stake_amount(&env, amount, &terms)?;

        let token_address = storage::get_token(&env)?;
        let token_client = token::Client::new(&env, &token_address);
        let ledger = env.current_contract_address();

        if token_client.allowance(&user, &ledger) < amount {
            return Err(Error::InsufficientAllowance);
        }
        if token_client.balance(&user) < amount {
            return Err(Error::InsufficientBalance);
        }

        let uplift = calculate_uplift(amount, &terms).ok_or(Error::MathOverflow)?;

        let mut totals = storage::get_totals(&env);
        totals.total_staked = totals
            .total_staked
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;
        totals.total_uplift_minted = totals
            .total_uplift_minted
            .checked_add(uplift)
            .ok_or(Error::MathOverflow)?;
        totals.stake_count = totals
            .stake_count
            .checked_add(1)
            .ok_or(Error::MathOverflow)?;

        let stake_id = storage::next_stake_id(&env)?;

        // Pull principal, then mint the uplift into the ledger
        token_client.transfer_from(&ledger, &user, &ledger, &amount);

        if uplift > 0 {
            env.invoke_contract::<()>(
                &token_address,
                &Symbol::new(&env, "mint"),
                vec![
                    &env,
                    ledger.into_val(&env),
                    ledger.into_val(&env),
                    uplift.into_val(&env),
                ],
            );
        }

        let record = StakeRecord {
            id: stake_id,
            owner: user.clone(),
            stake_type,
            amount,
            created_at: env.ledger().timestamp(),
            cash_back_claimed: false,
            withdrawn: false,
            claimed: 0,
        };

        storage::set_stake(&env, &record);
        storage::push_user_stake(&env, &user, stake_id);
        storage::set_totals(&env, &totals);
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "staked"), user.clone()),
            StakedEvent {
                stake_id,
                user,
                stake_type,
                amount,
                uplift,
            },
        );

        Ok(stake_id)
    }

    /// Pay the one-time cashback of a stake
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidStakeId`: Unknown stake or not owned by `user`
    /// - `AlreadyClaimed`: Cashback already paid
    pub fn cash_back(env: Env, user: Address, stake_id: u64) -> Result<(), Error> {
        check_not_paused(&env)?;

        user.require_auth();

        let mut record = storage::get_owned_stake(&env, &user, stake_id)?;
        if record.cash_back_claimed {
            return Err(Error::AlreadyClaimed);
        }

        let terms = stake_terms(record.stake_type).ok_or(Error::InvalidStakeType)?;
        let amount = calculate_cash_back(record.amount, &terms).ok_or(Error::MathOverflow)?;

        let mut totals = storage::get_totals(&env);
        totals.total_cash_back_paid = totals
            .total_cash_back_paid
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;

        Self::pay_out(&env, &user, amount)?;

        record.cash_back_claimed = true;
        storage::set_stake(&env, &record);
        storage::set_totals(&env, &totals);
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "cash_back"), user.clone()),
            CashBackEvent {
                stake_id,
                user,
                amount,
            },
        );

        Ok(())
    }

    /// Pay the yield accrued since the previous claim and return it
    ///
    /// Pays 0 once the yield budget has been fully claimed.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidStakeId`: Unknown stake or not owned by `user`
    pub fn claim(env: Env, user: Address, stake_id: u64) -> Result<i128, Error> {
        check_not_paused(&env)?;

        user.require_auth();

        let mut record = storage::get_owned_stake(&env, &user, stake_id)?;
        let terms = stake_terms(record.stake_type).ok_or(Error::InvalidStakeType)?;

        let now = env.ledger().timestamp();
        let amount = calculate_pending(&record, &terms, now).ok_or(Error::MathOverflow)?;
        if amount == 0 {
            return Ok(0);
        }

        record.claimed = record
            .claimed
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;

        let mut totals = storage::get_totals(&env);
        totals.total_rewards_paid = totals
            .total_rewards_paid
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;

        Self::pay_out(&env, &user, amount)?;

        storage::set_stake(&env, &record);
        storage::set_totals(&env, &totals);
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "claimed"), user.clone()),
            ClaimedEvent {
                stake_id,
                user,
                amount,
                total_claimed: record.claimed,
            },
        );

        Ok(amount)
    }

    /// Return the principal once the lock period has elapsed
    ///
    /// Outstanding yield stays claimable through `claim`.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidStakeId`: Unknown stake or not owned by `user`
    /// - `LockNotExpired`: Lock period still running
    /// - `AlreadyWithdrawn`: Principal already returned
    pub fn withdraw(env: Env, user: Address, stake_id: u64) -> Result<(), Error> {
        check_not_paused(&env)?;

        user.require_auth();

        let mut record = storage::get_owned_stake(&env, &user, stake_id)?;
        let terms = stake_terms(record.stake_type).ok_or(Error::InvalidStakeType)?;
        validate_withdrawal(&env, &record, &terms, env.ledger().timestamp())?;

        let mut totals = storage::get_totals(&env);
        totals.total_staked = totals
            .total_staked
            .checked_sub(record.amount)
            .ok_or(Error::MathOverflow)?;
        totals.total_withdrawn = totals
            .total_withdrawn
            .checked_add(record.amount)
            .ok_or(Error::MathOverflow)?;

        Self::pay_out(&env, &user, record.amount)?;

        record.withdrawn = true;
        storage::set_stake(&env, &record);
        storage::set_totals(&env, &totals);
        storage::bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "withdrawn"), user.clone()),
            WithdrawnEvent {
                stake_id,
                user,
                amount: record.amount,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Yield `claim` would pay now; 0 for unknown or foreign stakes
    pub fn pending_rewards(env: Env, user: Address, stake_id: u64) -> i128 {
        let Ok(record) = storage::get_owned_stake(&env, &user, stake_id) else {
            return 0;
        };
        stake_terms(record.stake_type)
            .and_then(|terms| calculate_pending(&record, &terms, env.ledger().timestamp()))
            .unwrap_or(0)
    }

    /// Number of stakes created by `user`
    pub fn stake_length(env: Env, user: Address) -> u32 {
        storage::get_user_stakes(&env, &user).len()
    }

    /// Stake id at `index` in `user`'s creation order
    pub fn stake_at(env: Env, user: Address, index: u32) -> Option<u64> {
        storage::get_user_stakes(&env, &user).get(index)
    }

    /// All stake ids of `user` in creation order
    pub fn stake_total_ids(env: Env, user: Address) -> Vec<u64> {
        storage::get_user_stakes(&env, &user)
    }

    /// Whether `stake_id` exists and belongs to `user`
    pub fn is_contains(env: Env, user: Address, stake_id: u64) -> bool {
        storage::get_owned_stake(&env, &user, stake_id).is_ok()
    }

    /// Full records of `user`'s stakes, withdrawn ones included
    pub fn get_stakes(env: Env, user: Address) -> Vec<StakeRecord> {
        let mut records = Vec::new(&env);
        for stake_id in storage::get_user_stakes(&env, &user).iter() {
            if let Some(record) = storage::get_stake(&env, stake_id) {
                records.push_back(record);
            }
        }
        records
    }

    /// Record of `stake_id` if `user` owns it
    pub fn get_stake(env: Env, user: Address, stake_id: u64) -> Option<StakeRecord> {
        storage::get_owned_stake(&env, &user, stake_id).ok()
    }

    /// Lock period, yield, cashback and minimum for `stake_type`
    pub fn stake_terms(_env: Env, stake_type: u32) -> Option<StakeTerms> {
        stake_terms(stake_type)
    }

    /// Ledger-wide accounting
    pub fn get_totals(env: Env) -> Totals {
        storage::get_totals(&env)
    }

    /// Current referral wallet
    pub fn ref_wallet(env: Env) -> Result<Address, Error> {
        storage::get_ref_wallet(&env)
    }

    /// Get admin address
    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env)
    }

    /// Address of the uSTK token the ledger pays in
    pub fn token(env: Env) -> Result<Address, Error> {
        storage::get_token(&env)
    }

    /// Check if user flows are paused
    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn pay_out(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        let token_address = storage::get_token(env)?;
        token::Client::new(env, &token_address).transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );
        Ok(())
    }
}
