pub mod reward_pool;
pub mod stake_info;

pub use reward_pool::*;
pub use stake_info::*;
