use solana_program::instruction::AccountMeta;
use solana_program::pubkey::Pubkey;

pub trait ToAccountMeta {
    fn to_signer(&self) -> AccountMeta;
    fn to_readonly_signer(&self) -> AccountMeta;
    fn to_readonly(&self) -> AccountMeta;
    fn to_writable(&self) -> AccountMeta;
}

impl ToAccountMeta for Pubkey {
    fn to_signer(&self) -> AccountMeta {
        AccountMeta::new(*self, true)
    }

    fn to_readonly_signer(&self) -> AccountMeta {
        AccountMeta::new_readonly(*self, true)
    }

    fn to_readonly(&self) -> AccountMeta {
        AccountMeta::new_readonly(*self, false)
    }

    fn to_writable(&self) -> AccountMeta {
        AccountMeta::new(*self, false)
    }
}
