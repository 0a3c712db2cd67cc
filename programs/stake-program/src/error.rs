use anchor_lang::prelude::*;

#[error_code]
pub enum StakeError {
    // Pool State Errors (6000-6009)
    #[msg("Reward pool already initialized for this mint")]
    AlreadyInitialized,

    // Amount Errors (6010-6019)
    #[msg("Invalid amount: must be greater than zero and not exceed the staked balance")]
    InvalidAmount,

    #[msg("Insufficient token balance to stake")]
    InsufficientBalance,

    #[msg("Reward vault balance cannot cover the accrued reward")]
    InsufficientRewardPool,

    #[msg("Reward rate exceeds maximum")]
    InvalidRewardRate,

    // Authorization Errors (6020-6029)
    #[msg("Unauthorized: signer does not own this account")]
    Unauthorized,

    // Math Errors (6030-6039)
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    // Account Validation Errors (6040-6049)
    #[msg("Invalid mint for this reward pool")]
    InvalidMint,

    #[msg("Reward vault does not belong to this reward pool")]
    InvalidRewardVault,
}
