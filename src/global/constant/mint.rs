use solana_program::native_token::LAMPORTS_PER_SOL;

/// Fixed parameters of the minted token.
pub struct MintParams;

impl MintParams {
    pub const PRECISION: u8 = 9;
    pub const INITIAL_SUPPLY: u64 = 100;
    pub const AIRDROP_LAMPORTS: u64 = 2 * LAMPORTS_PER_SOL;
}
