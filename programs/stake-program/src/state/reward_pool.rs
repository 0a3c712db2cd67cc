use anchor_lang::prelude::*;

use crate::constants::{MAX_REWARD_RATE, RATE_PRECISION};
use crate::error::StakeError;

/// Per-mint reward pool state
/// PDA: ["reward_pool", mint]
#[account]
#[derive(Default)]
pub struct RewardPool {
    /// Admin who can tune the reward rate
    pub admin: Pubkey,

    /// Token mint staked and paid out by this pool
    pub mint: Pubkey,

    /// Token account funding payouts
    /// PDA: ["reward", mint]
    pub reward_vault: Pubkey,

    /// Reward units per staked unit per second (scaled by RATE_PRECISION)
    pub reward_rate: u64,

    /// Reward per staked unit accumulated up to `last_update_time`
    /// (scaled by RATE_PRECISION)
    pub reward_per_token_stored: u128,

    /// Timestamp `reward_per_token_stored` was last settled at
    pub last_update_time: i64,

    /// Total tokens currently held in escrows for this mint
    pub total_staked: u64,

    /// Total rewards paid out (lifetime)
    pub total_rewards_paid: u64,

    /// Number of open stake records
    pub staker_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl RewardPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // mint
        32 + // reward_vault
        8 +  // reward_rate
        16 + // reward_per_token_stored
        8 +  // last_update_time
        8 +  // total_staked
        8 +  // total_rewards_paid
        8 +  // staker_count
        1 +  // bump
        1 +  // reward_vault_bump
        32;  // padding for future fields

    /// A zeroed account was just allocated and has never been written
    pub fn is_initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }

    /// Reward per staked unit accumulated up to `now`
    /// Formula: stored + (now - last_update_time) * reward_rate
    pub fn reward_per_token(&self, now: i64) -> Result<u128> {
        let elapsed = now.saturating_sub(self.last_update_time).max(0) as u128;

        elapsed
            .checked_mul(self.reward_rate as u128)
            .and_then(|accrued| self.reward_per_token_stored.checked_add(accrued))
            .ok_or_else(|| error!(StakeError::MathOverflow))
    }

    /// Reward earned by `position` tokens since the `paid` snapshot
    /// Formula: reward = position * (reward_per_token(now) - paid) / PRECISION
    ///
    /// A reward too large for u64 can never be covered by the vault.
    pub fn earned(&self, position: u64, paid: u128, now: i64) -> Result<u64> {
        let delta = self.reward_per_token(now)?.saturating_sub(paid);

        let reward = (position as u128)
            .checked_mul(delta)
            .ok_or(StakeError::InsufficientRewardPool)?
            / RATE_PRECISION;

        u64::try_from(reward).map_err(|_| error!(StakeError::InsufficientRewardPool))
    }

    /// Settle the accumulator at `now` under the current rate
    pub fn checkpoint(&mut self, now: i64) -> Result<()> {
        self.reward_per_token_stored = self.reward_per_token(now)?;
        self.last_update_time = self.last_update_time.max(now);
        Ok(())
    }

    /// Change the rate from `now` on. Time before `now` keeps the old rate.
    pub fn set_reward_rate(&mut self, rate: u64, now: i64) -> Result<()> {
        require!(rate <= MAX_REWARD_RATE, StakeError::InvalidRewardRate);
        self.checkpoint(now)?;
        self.reward_rate = rate;
        Ok(())
    }

    /// Account for a new deposit into an escrow
    pub fn record_stake(&mut self, amount: u64, opened_position: bool) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakeError::MathOverflow)?;

        if opened_position {
            self.staker_count = self
                .staker_count
                .checked_add(1)
                .ok_or(StakeError::MathOverflow)?;
        }

        Ok(())
    }

    /// Account for principal leaving an escrow and a reward leaving the vault
    pub fn record_unstake(&mut self, principal: u64, reward: u64, closed_position: bool) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(principal)
            .ok_or(StakeError::MathUnderflow)?;

        self.total_rewards_paid = self
            .total_rewards_paid
            .checked_add(reward)
            .ok_or(StakeError::MathOverflow)?;

        if closed_position {
            self.staker_count = self
                .staker_count
                .checked_sub(1)
                .ok_or(StakeError::MathUnderflow)?;
        }

        Ok(())
    }
}
