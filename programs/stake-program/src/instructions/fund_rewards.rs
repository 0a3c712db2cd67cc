use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_POOL_SEED, REWARD_VAULT_SEED};
use crate::error::StakeError;
use crate::events::RewardsFunded;
use crate::state::RewardPool;

/// Top up a reward pool's vault
///
/// Anyone may fund rewards. Tokens sent straight to the vault work just as
/// well; this instruction adds validation and an event for indexers.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to add to the reward vault
///
#[derive(Accounts)]
pub struct FundRewards<'info> {
    /// Account paying in the rewards
    pub funder: Signer<'info>,

    /// Reward pool for this mint
    #[account(
        seeds = [REWARD_POOL_SEED, mint.key().as_ref()],
        bump = reward_pool.bump,
        has_one = mint @ StakeError::InvalidMint,
        has_one = reward_vault @ StakeError::InvalidRewardVault
    )]
    pub reward_pool: Account<'info, RewardPool>,

    /// Token mint of the pool
    pub mint: Account<'info, Mint>,

    /// Source of rewards, owned by the funder
    #[account(
        mut,
        token::mint = mint,
        token::authority = funder
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, mint.key().as_ref()],
        bump = reward_pool.reward_vault_bump,
        token::mint = mint
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    require!(amount > 0, StakeError::InvalidAmount);
    require!(
        ctx.accounts.funder_token_account.amount >= amount,
        StakeError::InsufficientBalance
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_token_account.to_account_info(),
                to: ctx.accounts.reward_vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.reward_vault.reload()?;
    let vault_balance = ctx.accounts.reward_vault.amount;

    msg!(
        "Funded {} rewards for mint {}. Vault balance: {}",
        amount,
        ctx.accounts.mint.key(),
        vault_balance
    );

    emit!(RewardsFunded {
        funder: ctx.accounts.funder.key(),
        mint: ctx.accounts.mint.key(),
        amount,
        vault_balance,
    });

    Ok(())
}
