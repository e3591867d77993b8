use solana_program::pubkey::Pubkey;
use solana_sdk::pubkey;

pub struct TokenProgram;

impl TokenProgram {
    // Same id on devnet, testnet and mainnet; prefer spl_token::ID when linking spl_token directly
    pub const SPL_TOKEN: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
}
