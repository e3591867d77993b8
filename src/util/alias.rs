use anyhow::{Error, Result};
use solana_program::pubkey::Pubkey;

// type alias
pub type MintAddress = Pubkey;
pub type TokenAccountAddress = Pubkey;
pub type TokenProgramAddress = Pubkey;
pub type Lamports = u64;
pub type AResult<T, E = Error> = Result<T, E>;
