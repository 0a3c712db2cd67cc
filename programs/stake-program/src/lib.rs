use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;

use instructions::*;

declare_id!("D7xu4dyX8xhkSDnQkpb3Ygdxonn9Zk1H5tWUcqzAsXa9");

#[program]
pub mod stake_program {
    use super::*;

    /// Initialize the reward pool and reward vault for a mint
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    /// # Accounts
    /// * `admin` - Pool admin (signer, payer)
    /// * `reward_pool` - Reward pool PDA to create
    /// * `mint` - Token mint staked and paid out
    /// * `reward_vault` - Reward vault PDA to create
    ///
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler_initialize(ctx)
    }

    /// Stake tokens into the staker's escrow
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to stake
    ///
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler_stake(ctx, amount)
    }

    /// Withdraw principal plus the reward accrued since the last stake action
    ///
    /// Unstaking the whole position closes the escrow and the stake record.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to withdraw
    ///
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::unstake::handler_unstake(ctx, amount)
    }

    /// Add tokens to a reward vault
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to add
    ///
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards::handler_fund_rewards(ctx, amount)
    }

    /// Change the per-second reward rate (admin only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `reward_rate` - Reward per staked unit per second, scaled by 10^12
    ///
    pub fn set_reward_rate(ctx: Context<SetRewardRate>, reward_rate: u64) -> Result<()> {
        instructions::admin::set_reward_rate(ctx, reward_rate)
    }
}
