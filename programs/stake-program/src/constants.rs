// =============================================================================
// Stake Program Constants
// =============================================================================

// PDA Seeds
pub const REWARD_POOL_SEED: &[u8] = b"reward_pool";
pub const REWARD_VAULT_SEED: &[u8] = b"reward";
pub const STAKE_INFO_SEED: &[u8] = b"stake_info";
pub const ESCROW_SEED: &[u8] = b"escrow";

// Reward rate is expressed in reward units per staked unit per second,
// scaled by RATE_PRECISION (12 decimals)
pub const RATE_PRECISION: u128 = 1_000_000_000_000; // 10^12

// ~1% of the staked position per day: 0.01 / 86_400 * 10^12
pub const DEFAULT_REWARD_RATE: u64 = 115_740;

// Upper bound the admin may set: 100% of the position per second
pub const MAX_REWARD_RATE: u64 = 1_000_000_000_000;
