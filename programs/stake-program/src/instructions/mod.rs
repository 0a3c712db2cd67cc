// =============================================================================
// Instructions Module - Stake Program
// =============================================================================

pub mod admin;
pub mod fund_rewards;
pub mod initialize;
pub mod stake;
pub mod unstake;

pub use admin::*;
pub use fund_rewards::*;
pub use initialize::*;
pub use stake::*;
pub use unstake::*;
