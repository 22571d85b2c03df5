use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct StakedEvent {
    pub stake_id: u64,
    pub user: Address,
    pub stake_type: u32,
    pub amount: i128,
    pub uplift: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct CashBackEvent {
    pub stake_id: u64,
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClaimedEvent {
    pub stake_id: u64,
    pub user: Address,
    pub amount: i128,
    pub total_claimed: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct WithdrawnEvent {
    pub stake_id: u64,
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RefWalletUpdatedEvent {
    pub old_wallet: Address,
    pub new_wallet: Address,
}
