use crate::util::alias::{AResult, TokenAccountAddress};
use crate::util::traits::account_meta::ToAccountMeta;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;

/// Instructions of the on-chain program under reproduction. Borsh-encoded, the variant
/// index is the leading tag byte.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub enum ReproInstruction {
    /// Accounts:
    /// 0. `[writable, signer]` admin
    /// 1. `[writable]` token account, already initialized
    InitializeToken,
}

impl ReproInstruction {
    pub fn initialize_token(
        program_id: &Pubkey,
        admin: &Pubkey,
        token_account: &TokenAccountAddress,
    ) -> Instruction {
        Instruction::new_with_borsh(
            *program_id,
            &ReproInstruction::InitializeToken,
            vec![admin.to_signer(), token_account.to_writable()],
        )
    }

    pub fn unpack(data: &[u8]) -> AResult<Self> {
        Ok(ReproInstruction::try_from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_token_layout() {
        let program = Pubkey::new_unique();
        let admin = Pubkey::new_unique();
        let token_account = Pubkey::new_unique();

        let ix = ReproInstruction::initialize_token(&program, &admin, &token_account);

        assert_eq!(ix.program_id, program);
        assert_eq!(ix.data, vec![0]);
        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].pubkey == admin);
        assert!(ix.accounts[1].is_writable && !ix.accounts[1].is_signer);
        assert_eq!(
            ReproInstruction::unpack(&ix.data).unwrap(),
            ReproInstruction::InitializeToken
        );
    }

    #[test]
    fn test_unpack_unknown_tag() {
        assert!(ReproInstruction::unpack(&[9]).is_err());
    }
}
