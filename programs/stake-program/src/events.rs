use anchor_lang::prelude::*;

#[event]
pub struct RewardPoolInitialized {
    pub mint: Pubkey,
    pub admin: Pubkey,
    pub reward_vault: Pubkey,
    pub reward_rate: u64,
}

#[event]
pub struct Staked {
    pub staker: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct Unstaked {
    pub staker: Pubkey,
    pub mint: Pubkey,
    pub principal: u64,
    pub reward: u64,
    pub remaining: u64,
    pub closed: bool,
    pub timestamp: i64,
}

#[event]
pub struct RewardsFunded {
    pub funder: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
}

#[event]
pub struct RewardRateUpdated {
    pub mint: Pubkey,
    pub old_rate: u64,
    pub new_rate: u64,
}
