use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer};

use crate::constants::{ESCROW_SEED, REWARD_POOL_SEED, REWARD_VAULT_SEED, STAKE_INFO_SEED};
use crate::error::StakeError;
use crate::events::Unstaked;
use crate::state::{RewardPool, StakeInfo};

/// Unstake tokens and collect the accrued reward
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of principal to withdraw
///
/// # Flow
/// 1. Plan the unstake: validate amount, compute reward, check vault balance
/// 2. Transfer principal from escrow back to staker
/// 3. Transfer reward from reward vault to staker
/// 4. Update stake record and pool totals
/// 5. On full unstake, close the escrow and the stake record
///
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// User unstaking their tokens
    #[account(mut)]
    pub staker: Signer<'info>,

    /// Reward pool for this mint
    #[account(
        mut,
        seeds = [REWARD_POOL_SEED, mint.key().as_ref()],
        bump = reward_pool.bump,
        has_one = mint @ StakeError::InvalidMint,
        has_one = reward_vault @ StakeError::InvalidRewardVault
    )]
    pub reward_pool: Account<'info, RewardPool>,

    /// Token mint being unstaked
    pub mint: Account<'info, Mint>,

    /// Staker's position
    /// Seeds use the recorded staker so a foreign signer fails as Unauthorized
    #[account(
        mut,
        seeds = [STAKE_INFO_SEED, stake_info.staker.as_ref(), mint.key().as_ref()],
        bump = stake_info.bump,
        has_one = mint @ StakeError::InvalidMint,
        constraint = stake_info.is_owned_by(&staker.key()) @ StakeError::Unauthorized
    )]
    pub stake_info: Account<'info, StakeInfo>,

    /// Escrow holding the staked principal
    #[account(
        mut,
        seeds = [ESCROW_SEED, stake_info.key().as_ref()],
        bump = stake_info.escrow_bump,
        token::mint = mint,
        token::authority = stake_info
    )]
    pub escrow: Account<'info, TokenAccount>,

    /// Vault funding rewards
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, mint.key().as_ref()],
        bump = reward_pool.reward_vault_bump,
        token::mint = mint,
        token::authority = reward_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Staker's token account
    #[account(
        mut,
        token::mint = mint,
        token::authority = staker
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // Every check happens here, before any token moves
    let plan = ctx.accounts.stake_info.plan_unstake(
        amount,
        &ctx.accounts.reward_pool,
        ctx.accounts.reward_vault.amount,
        now,
    )?;

    msg!("reward: {}", plan.reward);

    let staker_key = ctx.accounts.staker.key();
    let mint_key = ctx.accounts.mint.key();

    // Stake record PDA signs for the escrow
    let stake_info_seeds = &[
        STAKE_INFO_SEED,
        staker_key.as_ref(),
        mint_key.as_ref(),
        &[ctx.accounts.stake_info.bump],
    ];
    let stake_info_signer = &[&stake_info_seeds[..]];

    // Transfer principal from escrow back to staker
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow.to_account_info(),
                to: ctx.accounts.staker_token_account.to_account_info(),
                authority: ctx.accounts.stake_info.to_account_info(),
            },
            stake_info_signer,
        ),
        plan.principal,
    )?;

    // Transfer reward from reward vault to staker
    // Reward pool PDA signs as vault authority
    if plan.reward > 0 {
        let reward_pool_seeds = &[
            REWARD_POOL_SEED,
            mint_key.as_ref(),
            &[ctx.accounts.reward_pool.bump],
        ];
        let reward_pool_signer = &[&reward_pool_seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.reward_vault.to_account_info(),
                    to: ctx.accounts.staker_token_account.to_account_info(),
                    authority: ctx.accounts.reward_pool.to_account_info(),
                },
                reward_pool_signer,
            ),
            plan.reward,
        )?;
    }

    ctx.accounts
        .stake_info
        .record_unstake(plan.principal, now, plan.reward_per_token)?;
    ctx.accounts
        .reward_pool
        .record_unstake(plan.principal, plan.reward, plan.closes_position)?;

    if plan.closes_position {
        // Anything sent to the escrow outside of stake goes back to the staker
        ctx.accounts.escrow.reload()?;
        let dust = ctx.accounts.escrow.amount;
        if dust > 0 {
            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.escrow.to_account_info(),
                        to: ctx.accounts.staker_token_account.to_account_info(),
                        authority: ctx.accounts.stake_info.to_account_info(),
                    },
                    stake_info_signer,
                ),
                dust,
            )?;
            msg!("Swept {} dust from escrow", dust);
        }

        // Close escrow, rent back to staker
        token::close_account(CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            CloseAccount {
                account: ctx.accounts.escrow.to_account_info(),
                destination: ctx.accounts.staker.to_account_info(),
                authority: ctx.accounts.stake_info.to_account_info(),
            },
            stake_info_signer,
        ))?;

        // Close stake record, rent back to staker
        ctx.accounts
            .stake_info
            .close(ctx.accounts.staker.to_account_info())?;
    }

    msg!(
        "Unstaked {} of mint {} with reward {}. Paid out: {}, Remaining: {}, Pool total: {}",
        plan.principal,
        mint_key,
        plan.reward,
        plan.payout()?,
        plan.remaining,
        ctx.accounts.reward_pool.total_staked
    );

    emit!(Unstaked {
        staker: staker_key,
        mint: mint_key,
        principal: plan.principal,
        reward: plan.reward,
        remaining: plan.remaining,
        closed: plan.closes_position,
        timestamp: now,
    });

    Ok(())
}
