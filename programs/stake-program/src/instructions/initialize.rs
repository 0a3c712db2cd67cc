use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{DEFAULT_REWARD_RATE, REWARD_POOL_SEED, REWARD_VAULT_SEED};
use crate::error::StakeError;
use crate::events::RewardPoolInitialized;
use crate::state::RewardPool;

/// Initialize the reward pool for a mint
///
/// # Arguments
/// * `ctx` - The context containing all accounts
///
/// # Accounts
/// * `admin` - The admin who will control this pool (signer, payer)
/// * `reward_pool` - The reward pool PDA to create
/// * `mint` - The token mint staked and paid out
/// * `reward_vault` - The vault funding payouts, owned by the reward pool
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin who will control this reward pool
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Reward pool PDA
    /// init_if_needed so a second call surfaces AlreadyInitialized
    #[account(
        init_if_needed,
        payer = admin,
        space = RewardPool::SIZE,
        seeds = [REWARD_POOL_SEED, mint.key().as_ref()],
        bump
    )]
    pub reward_pool: Account<'info, RewardPool>,

    /// Token mint for this pool
    pub mint: Account<'info, Mint>,

    /// Vault holding reward tokens
    #[account(
        init_if_needed,
        payer = admin,
        seeds = [REWARD_VAULT_SEED, mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = reward_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let reward_pool = &mut ctx.accounts.reward_pool;

    require!(
        !reward_pool.is_initialized(),
        StakeError::AlreadyInitialized
    );

    reward_pool.admin = ctx.accounts.admin.key();
    reward_pool.mint = ctx.accounts.mint.key();
    reward_pool.reward_vault = ctx.accounts.reward_vault.key();
    reward_pool.reward_rate = DEFAULT_REWARD_RATE;
    reward_pool.reward_per_token_stored = 0;
    reward_pool.last_update_time = now;

    // Initialize counters
    reward_pool.total_staked = 0;
    reward_pool.total_rewards_paid = 0;
    reward_pool.staker_count = 0;

    // Store bump seeds
    reward_pool.bump = ctx.bumps.reward_pool;
    reward_pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Reward pool initialized: mint={}, reward_vault={}, rate={}",
        reward_pool.mint,
        reward_pool.reward_vault,
        reward_pool.reward_rate
    );

    emit!(RewardPoolInitialized {
        mint: reward_pool.mint,
        admin: reward_pool.admin,
        reward_vault: reward_pool.reward_vault,
        reward_rate: reward_pool.reward_rate,
    });

    Ok(())
}
