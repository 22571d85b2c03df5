#![no_std]

mod allowance;
mod balance;
mod error;
mod events;
mod storage;

pub use error::Error;
pub use storage::{DECIMALS, INITIAL_SUPPLY, MAX_SUPPLY, TOKEN_UNIT};

use allowance::{read_allowance, spend_allowance, write_allowance};
use balance::{read_balance, read_total_supply, receive_balance, spend_balance, write_total_supply};
use events::{MinterGrantedEvent, MinterRevokedEvent};
use storage::{DataKey, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, NAME, SYMBOL};

use soroban_sdk::token::{self, Interface as _};
use soroban_sdk::{contract, contractimpl, contractmeta, panic_with_error, Address, Env, String, Symbol};
use soroban_token_sdk::metadata::TokenMetadata;
use soroban_token_sdk::TokenUtils;

contractmeta!(key = "Description", val = "uSTK token paired with the uStaking ledger");

fn check_nonnegative_amount(env: &Env, amount: i128) {
    if amount < 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

#[contract]
pub struct UStakingToken;

#[contractimpl]
impl UStakingToken {
    /// Initialize the token and mint the initial supply to `admin`
    ///
    /// The admin also receives the minter role.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::Minter(admin.clone()), &true);

        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: DECIMALS,
            name: String::from_str(&env, NAME),
            symbol: String::from_str(&env, SYMBOL),
        });

        receive_balance(&env, &admin, INITIAL_SUPPLY);
        write_total_supply(&env, INITIAL_SUPPLY);
        bump_instance(&env);

        TokenUtils::new(&env)
            .events()
            .mint(admin.clone(), admin, INITIAL_SUPPLY);

        Ok(())
    }

    /// Grant the minter role (the staking ledger mints its uplift with it)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn grant_minter(env: Env, account: Address) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Minter(account.clone()), &true);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "minter_granted"), account.clone()),
            MinterGrantedEvent { admin, account },
        );

        Ok(())
    }

    /// Revoke the minter role
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn revoke_minter(env: Env, account: Address) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        env.storage()
            .instance()
            .remove(&DataKey::Minter(account.clone()));
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "minter_revoked"), account.clone()),
            MinterRevokedEvent { admin, account },
        );

        Ok(())
    }

    /// Mint new tokens (minters only), capped by `MAX_SUPPLY`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotMinter`: Caller does not hold the minter role
    /// - `InvalidAmount`: Amount <= 0
    /// - `ExceedsMaxSupply`: Total supply would pass the cap
    pub fn mint(env: Env, minter: Address, to: Address, amount: i128) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        minter.require_auth();

        if !Self::is_minter(env.clone(), minter.clone()) {
            return Err(Error::NotMinter);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let new_supply = read_total_supply(&env)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        if new_supply > MAX_SUPPLY {
            return Err(Error::ExceedsMaxSupply);
        }

        receive_balance(&env, &to, amount);
        write_total_supply(&env, new_supply);
        bump_instance(&env);

        TokenUtils::new(&env).events().mint(minter, to, amount);

        Ok(())
    }

    /// Check if address holds the minter role
    pub fn is_minter(env: Env, account: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Minter(account))
            .unwrap_or(false)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn max_supply(_env: Env) -> i128 {
        MAX_SUPPLY
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Self::read_admin(&env)
    }

    fn read_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }
}

#[contractimpl]
impl token::Interface for UStakingToken {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        read_allowance(&env, &from, &spender).amount
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        check_nonnegative_amount(&env, amount);
        from.require_auth();
        bump_instance(&env);

        write_allowance(&env, &from, &spender, amount, expiration_ledger);
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
    }

    fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        check_nonnegative_amount(&env, amount);
        from.require_auth();
        bump_instance(&env);

        spend_balance(&env, &from, amount);
        receive_balance(&env, &to, amount);
        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        check_nonnegative_amount(&env, amount);
        spender.require_auth();
        bump_instance(&env);

        spend_allowance(&env, &from, &spender, amount);
        spend_balance(&env, &from, amount);
        receive_balance(&env, &to, amount);
        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn burn(env: Env, from: Address, amount: i128) {
        check_nonnegative_amount(&env, amount);
        from.require_auth();
        bump_instance(&env);

        spend_balance(&env, &from, amount);
        write_total_supply(&env, read_total_supply(&env) - amount);
        TokenUtils::new(&env).events().burn(from, amount);
    }

    fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        check_nonnegative_amount(&env, amount);
        spender.require_auth();
        bump_instance(&env);

        spend_allowance(&env, &from, &spender, amount);
        spend_balance(&env, &from, amount);
        write_total_supply(&env, read_total_supply(&env) - amount);
        TokenUtils::new(&env).events().burn(from, amount);
    }

    fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use super::*;
    use pretty_assertions::assert_eq;
    use soroban_sdk::{testutils::Address as _, Address, Env, String};
    use soroban_sdk::token::TokenClient;

    fn setup(env: &Env) -> (UStakingTokenClient<'_>, Address) {
        env.mock_all_auths();

        let contract_id = env.register(UStakingToken, ());
        let client = UStakingTokenClient::new(env, &contract_id);

        let admin = Address::generate(env);
        client.initialize(&admin);

        (client, admin)
    }

    #[test]
    fn test_initialize() {
        let env = Env::default();
        let (client, admin) = setup(&env);

        assert_eq!(client.total_supply(), 79_000_000 * TOKEN_UNIT);
        assert_eq!(client.balance(&admin), INITIAL_SUPPLY);
        assert_eq!(client.admin(), admin);
        assert!(client.is_minter(&admin));

        let result = client.try_initialize(&admin);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_metadata() {
        let env = Env::default();
        let (client, _) = setup(&env);

        assert_eq!(client.name(), String::from_str(&env, "uStaking"));
        assert_eq!(client.symbol(), String::from_str(&env, "uSTK"));
        assert_eq!(client.decimals(), 18);
    }

    #[test]
    fn test_approve_and_allowance() {
        let env = Env::default();
        let (client, admin) = setup(&env);
        let spender = Address::generate(&env);

        let amount = 1500 * TOKEN_UNIT;
        client.approve(&admin, &spender, &amount, &1000);

        assert_eq!(client.allowance(&admin, &spender), amount);
    }

    #[test]
    fn test_transfer() {
        let env = Env::default();
        let (client, admin) = setup(&env);
        let user = Address::generate(&env);

        let amount = 2000 * TOKEN_UNIT;
        client.transfer(&admin, &user, &amount);

        assert_eq!(client.balance(&user), amount);
        assert_eq!(client.balance(&admin), INITIAL_SUPPLY - amount);
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let env = Env::default();
        let (client, admin) = setup(&env);
        let spender = Address::generate(&env);
        let receiver = Address::generate(&env);

        client.approve(&admin, &spender, &(500 * TOKEN_UNIT), &1000);
        client.transfer_from(&spender, &admin, &receiver, &(200 * TOKEN_UNIT));

        assert_eq!(client.balance(&receiver), 200 * TOKEN_UNIT);
        assert_eq!(client.allowance(&admin, &spender), 300 * TOKEN_UNIT);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #7)")]
    fn test_transfer_from_over_allowance() {
        let env = Env::default();
        let (client, admin) = setup(&env);
        let spender = Address::generate(&env);

        client.approve(&admin, &spender, &(100 * TOKEN_UNIT), &1000);
        client.transfer_from(&spender, &admin, &spender, &(101 * TOKEN_UNIT));
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")]
    fn test_insufficient_balance_error() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        client.transfer(&user1, &user2, &TOKEN_UNIT);
    }

    #[test]
    fn test_minter_role() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let staking = Address::generate(&env);
        let user = Address::generate(&env);

        assert!(!client.is_minter(&staking));
        assert_eq!(
            client.try_mint(&staking, &user, &TOKEN_UNIT),
            Err(Ok(Error::NotMinter))
        );

        client.grant_minter(&staking);
        assert!(client.is_minter(&staking));

        client.mint(&staking, &user, &(320 * TOKEN_UNIT));
        assert_eq!(client.balance(&user), 320 * TOKEN_UNIT);
        assert_eq!(client.total_supply(), INITIAL_SUPPLY + 320 * TOKEN_UNIT);

        client.revoke_minter(&staking);
        assert!(!client.is_minter(&staking));
    }

    #[test]
    fn test_mint_respects_max_supply() {
        let env = Env::default();
        let (client, admin) = setup(&env);

        let headroom = MAX_SUPPLY - INITIAL_SUPPLY;
        assert_eq!(
            client.try_mint(&admin, &admin, &(headroom + 1)),
            Err(Ok(Error::ExceedsMaxSupply))
        );
        assert_eq!(client.try_mint(&admin, &admin, &0), Err(Ok(Error::InvalidAmount)));

        client.mint(&admin, &admin, &headroom);
        assert_eq!(client.total_supply(), client.max_supply());
    }

    #[test]
    fn test_standard_client_reaches_token_interface() {
        let env = Env::default();
        let (client, admin) = setup(&env);
        let user = Address::generate(&env);
        let spender = Address::generate(&env);
        let sep41 = TokenClient::new(&env, &client.address);

        sep41.transfer(&admin, &user, &(50 * TOKEN_UNIT));
        sep41.approve(&user, &spender, &(20 * TOKEN_UNIT), &1000);
        sep41.transfer_from(&spender, &user, &spender, &(5 * TOKEN_UNIT));
        sep41.burn_from(&spender, &user, &(5 * TOKEN_UNIT));
        sep41.burn(&user, &(10 * TOKEN_UNIT));

        assert_eq!(sep41.balance(&user), 30 * TOKEN_UNIT);
        assert_eq!(sep41.balance(&spender), 5 * TOKEN_UNIT);
        assert_eq!(sep41.allowance(&user, &spender), 10 * TOKEN_UNIT);
        assert_eq!(sep41.decimals(), DECIMALS);
        assert_eq!(sep41.name(), String::from_str(&env, "uStaking"));
        assert_eq!(sep41.symbol(), String::from_str(&env, "uSTK"));
        assert_eq!(client.total_supply(), INITIAL_SUPPLY - 15 * TOKEN_UNIT);
    }

    #[test]
    fn test_minter_role_changes_need_admin_auth() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let staking = Address::generate(&env);

        env.set_auths(&[]);
        assert!(client.try_grant_minter(&staking).is_err());
        assert!(!client.is_minter(&staking));

        env.mock_all_auths();
        client.grant_minter(&staking);
        assert!(client.is_minter(&staking));

        env.set_auths(&[]);
        assert!(client.try_revoke_minter(&staking).is_err());
        assert!(client.is_minter(&staking));
    }

    #[test]
    fn test_burn() {
        let env = Env::default();
        let (client, admin) = setup(&env);

        client.burn(&admin, &(400 * TOKEN_UNIT));

        assert_eq!(client.balance(&admin), INITIAL_SUPPLY - 400 * TOKEN_UNIT);
        assert_eq!(client.total_supply(), INITIAL_SUPPLY - 400 * TOKEN_UNIT);
    }
}
