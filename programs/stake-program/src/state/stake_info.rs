use anchor_lang::prelude::*;

use crate::error::StakeError;
use crate::state::RewardPool;

/// A staker's position in one mint
/// PDA: ["stake_info", staker, mint]
///
/// Invariant: `amount == 0` iff `!is_staked` iff the escrow does not exist.
/// The escrow balance always equals `amount`.
#[account]
#[derive(Default)]
pub struct StakeInfo {
    /// Owner of this position
    pub staker: Pubkey,

    /// Token mint staked
    pub mint: Pubkey,

    /// Principal held in escrow
    pub amount: u64,

    /// True while the escrow holds principal
    pub is_staked: bool,

    /// Start of the current accrual window (unix timestamp)
    pub last_accrual_time: i64,

    /// Pool reward_per_token when the current accrual window started
    pub reward_per_token_paid: u128,

    /// PDA bump seed
    pub bump: u8,

    /// Escrow token account bump seed
    pub escrow_bump: u8,
}

/// Outcome of a validated unstake, computed before any token moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnstakePlan {
    /// Principal returned from escrow
    pub principal: u64,

    /// Reward paid from the reward vault
    pub reward: u64,

    /// Principal left staked afterwards
    pub remaining: u64,

    /// The escrow and stake record are closed
    pub closes_position: bool,

    /// Pool reward_per_token the reward was settled at
    pub reward_per_token: u128,
}

impl UnstakePlan {
    pub fn payout(&self) -> Result<u64> {
        self.principal
            .checked_add(self.reward)
            .ok_or_else(|| error!(StakeError::MathOverflow))
    }
}

impl StakeInfo {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // staker
        32 + // mint
        8 +  // amount
        1 +  // is_staked
        8 +  // last_accrual_time
        16 + // reward_per_token_paid
        1 +  // bump
        1 +  // escrow_bump
        32;  // padding for future fields

    /// Record has been allocated but never staked into
    pub fn is_new(&self) -> bool {
        self.staker == Pubkey::default()
    }

    pub fn is_owned_by(&self, staker: &Pubkey) -> bool {
        self.staker == *staker
    }

    /// Record a stake action
    /// Starts a fresh accrual window for the whole position
    pub fn record_stake(&mut self, amount: u64, now: i64, reward_per_token: u128) -> Result<()> {
        require!(amount > 0, StakeError::InvalidAmount);

        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(StakeError::MathOverflow)?;

        self.is_staked = true;
        self.last_accrual_time = now;
        self.reward_per_token_paid = reward_per_token;

        Ok(())
    }

    /// Validate an unstake and work out what moves where
    ///
    /// The whole position accrues for the elapsed window, since the window
    /// restarts for whatever principal stays behind. A missing record never
    /// gets here: Anchor rejects it with `AccountNotInitialized`.
    pub fn plan_unstake(
        &self,
        amount: u64,
        pool: &RewardPool,
        reward_vault_balance: u64,
        now: i64,
    ) -> Result<UnstakePlan> {
        require!(amount > 0, StakeError::InvalidAmount);
        require!(amount <= self.amount, StakeError::InvalidAmount);

        let reward_per_token = pool.reward_per_token(now)?;
        let reward = pool.earned(self.amount, self.reward_per_token_paid, now)?;
        require!(
            reward <= reward_vault_balance,
            StakeError::InsufficientRewardPool
        );

        let remaining = self
            .amount
            .checked_sub(amount)
            .ok_or(StakeError::MathUnderflow)?;

        Ok(UnstakePlan {
            principal: amount,
            reward,
            remaining,
            closes_position: remaining == 0,
            reward_per_token,
        })
    }

    /// Record an unstake action
    pub fn record_unstake(&mut self, amount: u64, now: i64, reward_per_token: u128) -> Result<()> {
        require!(amount <= self.amount, StakeError::InvalidAmount);

        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(StakeError::MathUnderflow)?;

        if self.amount == 0 {
            self.is_staked = false;
        } else {
            self.last_accrual_time = now;
            self.reward_per_token_paid = reward_per_token;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_REWARD_RATE;

    const UNIT: u64 = 1_000_000;
    const T0: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    fn pool() -> RewardPool {
        RewardPool {
            mint: Pubkey::new_unique(),
            reward_rate: DEFAULT_REWARD_RATE,
            ..Default::default()
        }
    }

    fn index_at(pool: &RewardPool, now: i64) -> u128 {
        pool.reward_per_token(now).unwrap()
    }

    fn staked(amount: u64, at: i64) -> StakeInfo {
        let mut info = StakeInfo {
            staker: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            ..Default::default()
        };
        info.record_stake(amount, at, index_at(&pool(), at)).unwrap();
        info
    }

    #[test]
    fn test_first_stake_opens_position() {
        let info = staked(100 * UNIT, T0);
        assert_eq!(info.amount, 100 * UNIT);
        assert!(info.is_staked);
        assert_eq!(info.last_accrual_time, T0);
        assert_eq!(info.reward_per_token_paid, index_at(&pool(), T0));
    }

    #[test]
    fn test_repeated_stake_accumulates_and_resets_window() {
        let pool = pool();
        let mut info = staked(100 * UNIT, T0);
        info.record_stake(25 * UNIT, T0 + 60, index_at(&pool, T0 + 60))
            .unwrap();
        assert_eq!(info.amount, 125 * UNIT);
        assert_eq!(info.last_accrual_time, T0 + 60);

        // Reward earned before the second stake is forfeited
        let plan = info
            .plan_unstake(125 * UNIT, &pool, 1_000 * UNIT, T0 + 60)
            .unwrap();
        assert_eq!(plan.reward, 0);
    }

    #[test]
    fn test_zero_stake_is_rejected() {
        let mut info = StakeInfo::default();
        let err = info.record_stake(0, T0, 0).unwrap_err();
        assert_eq!(err, StakeError::InvalidAmount.into());
        assert!(!info.is_staked);
    }

    #[test]
    fn test_stake_overflow_leaves_record_untouched() {
        let mut info = staked(u64::MAX, T0);
        let paid = info.reward_per_token_paid;
        let err = info.record_stake(1, T0 + 1, paid + 1).unwrap_err();
        assert_eq!(err, StakeError::MathOverflow.into());
        assert_eq!(info.amount, u64::MAX);
        assert_eq!(info.last_accrual_time, T0);
        assert_eq!(info.reward_per_token_paid, paid);
    }

    #[test]
    fn test_partial_unstake_keeps_position_open() {
        let mut info = staked(101 * UNIT, T0);
        let plan = info
            .plan_unstake(50 * UNIT, &pool(), 1_000 * UNIT, T0 + 1)
            .unwrap();

        assert_eq!(plan.principal, 50 * UNIT);
        assert_eq!(plan.remaining, 51 * UNIT);
        assert!(plan.reward > 0);
        assert!(!plan.closes_position);
        assert_eq!(plan.payout().unwrap(), 50 * UNIT + plan.reward);

        info.record_unstake(plan.principal, T0 + 1, plan.reward_per_token)
            .unwrap();
        assert_eq!(info.amount, 51 * UNIT);
        assert!(info.is_staked);
        assert_eq!(info.last_accrual_time, T0 + 1);
        assert_eq!(info.reward_per_token_paid, plan.reward_per_token);
    }

    #[test]
    fn test_unstaking_the_rest_closes_position() {
        let pool = pool();
        let mut info = staked(101 * UNIT, T0);
        info.record_unstake(50 * UNIT, T0 + 1, index_at(&pool, T0 + 1))
            .unwrap();

        let plan = info
            .plan_unstake(51 * UNIT, &pool, 1_000 * UNIT, T0 + 2)
            .unwrap();
        assert_eq!(plan.remaining, 0);
        assert!(plan.closes_position);
        assert!(plan.reward > 0);

        info.record_unstake(plan.principal, T0 + 2, plan.reward_per_token)
            .unwrap();
        assert_eq!(info.amount, 0);
        assert!(!info.is_staked);
    }

    #[test]
    fn test_full_unstake_pays_principal_plus_reward() {
        let info = staked(100 * UNIT, T0);
        let plan = info
            .plan_unstake(100 * UNIT, &pool(), 1_000 * UNIT, T0 + 1)
            .unwrap();
        assert!(plan.closes_position);
        assert!(plan.payout().unwrap() > 100 * UNIT);
        assert!(plan.reward < 1_000 * UNIT);
    }

    #[test]
    fn test_over_withdrawal_is_rejected() {
        let info = staked(51 * UNIT, T0);
        let err = info
            .plan_unstake(51 * UNIT + 1, &pool(), 1_000 * UNIT, T0 + 1)
            .unwrap_err();
        assert_eq!(err, StakeError::InvalidAmount.into());
        assert_eq!(info.amount, 51 * UNIT);
    }

    #[test]
    fn test_zero_unstake_is_rejected() {
        let info = staked(51 * UNIT, T0);
        let err = info.plan_unstake(0, &pool(), 1_000 * UNIT, T0 + 1).unwrap_err();
        assert_eq!(err, StakeError::InvalidAmount.into());
    }

    #[test]
    fn test_empty_record_has_nothing_to_unstake() {
        let info = StakeInfo::default();
        let err = info.plan_unstake(1, &pool(), 1_000 * UNIT, T0).unwrap_err();
        assert_eq!(err, StakeError::InvalidAmount.into());
    }

    #[test]
    fn test_empty_reward_vault_aborts_unstake() {
        let info = staked(100 * UNIT, T0);
        let err = info.plan_unstake(100 * UNIT, &pool(), 0, T0 + 3_600).unwrap_err();
        assert_eq!(err, StakeError::InsufficientRewardPool.into());
        assert!(info.is_staked);
        assert_eq!(info.amount, 100 * UNIT);
    }

    #[test]
    fn test_unstake_in_same_second_needs_no_reward_funds() {
        let info = staked(100 * UNIT, T0);
        let plan = info.plan_unstake(100 * UNIT, &pool(), 0, T0).unwrap();
        assert_eq!(plan.reward, 0);
        assert_eq!(plan.payout().unwrap(), 100 * UNIT);
    }

    #[test]
    fn test_clock_going_backwards_accrues_nothing() {
        let info = staked(100 * UNIT, T0);
        let plan = info.plan_unstake(100 * UNIT, &pool(), 0, T0 - 10).unwrap();
        assert_eq!(plan.reward, 0);

        let plan = info
            .plan_unstake(100 * UNIT, &pool(), 1_000 * UNIT, T0 + 10)
            .unwrap();
        assert_eq!(plan.reward, pool().earned(100 * UNIT, 0, 10).unwrap());
    }

    #[test]
    fn test_rate_change_does_not_reprice_open_window() {
        let mut pool = pool();
        let info = staked(1_000_000 * UNIT, T0);
        let before = info
            .plan_unstake(info.amount, &pool, u64::MAX, T0 + DAY)
            .unwrap()
            .reward;
        assert!(before > 0);

        pool.set_reward_rate(0, T0 + DAY).unwrap();
        let after = info
            .plan_unstake(info.amount, &pool, u64::MAX, T0 + 30 * DAY)
            .unwrap()
            .reward;
        assert_eq!(after, before);
    }

    #[test]
    fn test_rate_raise_cannot_lock_principal() {
        let mut pool = pool();
        let info = staked(100 * UNIT, T0);
        let earned = info
            .plan_unstake(info.amount, &pool, u64::MAX, T0 + DAY)
            .unwrap()
            .reward;

        // Vault funded for the first day only; a raise right at withdrawal
        // time still leaves that window payable
        pool.set_reward_rate(crate::constants::MAX_REWARD_RATE, T0 + DAY)
            .unwrap();
        let plan = info
            .plan_unstake(info.amount, &pool, earned, T0 + DAY)
            .unwrap();
        assert_eq!(plan.reward, earned);
    }

    #[test]
    fn test_only_the_staker_owns_the_record() {
        // Backs `constraint = stake_info.is_owned_by(&staker.key()) @ Unauthorized`
        // on `Unstake::stake_info`: any other signer is rejected before the handler runs
        let info = staked(100 * UNIT, T0);
        assert!(info.is_owned_by(&info.staker));
        assert!(!info.is_owned_by(&Pubkey::new_unique()));
    }

    #[test]
    fn test_new_record_detection() {
        assert!(StakeInfo::default().is_new());
        assert!(!staked(1, T0).is_new());
    }

    #[test]
    fn test_escrow_balance_tracks_record_amount() {
        // Mirror the escrow balance through a stake/unstake cycle
        let pool = pool();
        let mut escrow = 0u64;
        let mut info = StakeInfo::default();

        info.record_stake(101 * UNIT, T0, index_at(&pool, T0)).unwrap();
        escrow += 101 * UNIT;
        assert_eq!(escrow, info.amount);

        let plan = info.plan_unstake(50 * UNIT, &pool, 1_000 * UNIT, T0 + 5).unwrap();
        escrow -= plan.principal;
        info.record_unstake(plan.principal, T0 + 5, plan.reward_per_token)
            .unwrap();
        assert_eq!(escrow, info.amount);

        let plan = info.plan_unstake(51 * UNIT, &pool, 1_000 * UNIT, T0 + 9).unwrap();
        escrow -= plan.principal;
        info.record_unstake(plan.principal, T0 + 9, plan.reward_per_token)
            .unwrap();
        assert_eq!(escrow, 0);
        assert!(!info.is_staked);
    }
}
