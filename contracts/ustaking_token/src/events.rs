use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinterGrantedEvent {
    pub admin: Address,
    pub account: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinterRevokedEvent {
    pub admin: Address,
    pub account: Address,
}
