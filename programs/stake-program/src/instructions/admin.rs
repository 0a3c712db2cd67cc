use anchor_lang::prelude::*;

use crate::constants::REWARD_POOL_SEED;
use crate::error::StakeError;
use crate::events::RewardRateUpdated;
use crate::state::RewardPool;

// =============================================================================
// Set Reward Rate
// =============================================================================

#[derive(Accounts)]
pub struct SetRewardRate<'info> {
    #[account(
        constraint = admin.key() == reward_pool.admin @ StakeError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_POOL_SEED, reward_pool.mint.as_ref()],
        bump = reward_pool.bump
    )]
    pub reward_pool: Account<'info, RewardPool>,
}

/// Time up to this call keeps accruing at the old rate
pub fn set_reward_rate(ctx: Context<SetRewardRate>, reward_rate: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let old_rate = reward_pool.reward_rate;

    reward_pool.set_reward_rate(reward_rate, now)?;

    msg!(
        "Reward rate for mint {} changed from {} to {}",
        reward_pool.mint,
        old_rate,
        reward_rate
    );

    emit!(RewardRateUpdated {
        mint: reward_pool.mint,
        old_rate,
        new_rate: reward_rate,
    });

    Ok(())
}
