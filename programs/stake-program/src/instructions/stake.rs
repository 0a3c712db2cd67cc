use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{ESCROW_SEED, REWARD_POOL_SEED, STAKE_INFO_SEED};
use crate::error::StakeError;
use crate::events::Staked;
use crate::state::{RewardPool, StakeInfo};

/// Stake tokens into the staker's escrow
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to stake
///
/// # Flow
/// 1. Validate amount and wallet balance
/// 2. Open the stake record and escrow on first stake
/// 3. Transfer tokens from staker to escrow
/// 4. Update stake record (restarts accrual window)
/// 5. Update pool totals
///
#[derive(Accounts)]
pub struct Stake<'info> {
    /// User staking their tokens
    #[account(mut)]
    pub staker: Signer<'info>,

    /// Reward pool for this mint; must exist before anyone stakes
    #[account(
        mut,
        seeds = [REWARD_POOL_SEED, mint.key().as_ref()],
        bump = reward_pool.bump,
        has_one = mint @ StakeError::InvalidMint
    )]
    pub reward_pool: Account<'info, RewardPool>,

    /// Token mint being staked
    pub mint: Account<'info, Mint>,

    /// Staker's position (created if first time)
    #[account(
        init_if_needed,
        payer = staker,
        space = StakeInfo::SIZE,
        seeds = [STAKE_INFO_SEED, staker.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub stake_info: Account<'info, StakeInfo>,

    /// Escrow holding the staked principal, owned by the stake record
    #[account(
        init_if_needed,
        payer = staker,
        seeds = [ESCROW_SEED, stake_info.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = stake_info
    )]
    pub escrow: Account<'info, TokenAccount>,

    /// Staker's token account
    #[account(
        mut,
        token::mint = mint,
        token::authority = staker
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    // Validate amount
    require!(amount > 0, StakeError::InvalidAmount);
    require!(
        ctx.accounts.staker_token_account.amount >= amount,
        StakeError::InsufficientBalance
    );

    let now = Clock::get()?.unix_timestamp;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let stake_info = &mut ctx.accounts.stake_info;

    // Fresh record, or one re-created after a full unstake
    let opens_position = !stake_info.is_staked;

    if stake_info.is_new() {
        stake_info.staker = ctx.accounts.staker.key();
        stake_info.mint = ctx.accounts.mint.key();
        stake_info.bump = ctx.bumps.stake_info;
        stake_info.escrow_bump = ctx.bumps.escrow;
    }

    // Transfer tokens from staker to escrow
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.staker_token_account.to_account_info(),
                to: ctx.accounts.escrow.to_account_info(),
                authority: ctx.accounts.staker.to_account_info(),
            },
        ),
        amount,
    )?;

    let reward_per_token = reward_pool.reward_per_token(now)?;
    stake_info.record_stake(amount, now, reward_per_token)?;
    reward_pool.record_stake(amount, opens_position)?;

    msg!(
        "Staked {} of mint {}. Position: {}, Pool total: {}",
        amount,
        stake_info.mint,
        stake_info.amount,
        reward_pool.total_staked
    );

    emit!(Staked {
        staker: stake_info.staker,
        mint: stake_info.mint,
        amount,
        total_staked: stake_info.amount,
        timestamp: now,
    });

    Ok(())
}
