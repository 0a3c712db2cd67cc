// =============================================================================
// PDA Derivation
// =============================================================================
// Every program-owned account is found from fixed seeds plus the keys it
// belongs to, so clients locate pools, records and escrows without a registry.
// The instruction account constraints use the same seeds.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::{ESCROW_SEED, REWARD_POOL_SEED, REWARD_VAULT_SEED, STAKE_INFO_SEED};

/// Reward pool state for a mint: ["reward_pool", mint]
pub fn reward_pool_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_POOL_SEED, mint.as_ref()], &crate::ID)
}

/// Reward vault token account for a mint: ["reward", mint]
pub fn reward_vault_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_VAULT_SEED, mint.as_ref()], &crate::ID)
}

/// Stake record for a staker in a mint: ["stake_info", staker, mint]
pub fn stake_info_address(staker: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[STAKE_INFO_SEED, staker.as_ref(), mint.as_ref()],
        &crate::ID,
    )
}

/// Escrow token account owned by a stake record: ["escrow", stake_info]
pub fn escrow_address(stake_info: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ESCROW_SEED, stake_info.as_ref()], &crate::ID)
}
