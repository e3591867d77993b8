use crate::error::ReproResult;
use crate::global::wallet::KeySource;
use crate::sdk::ledger::LedgerClient;
use crate::util::alias::{Lamports, TokenProgramAddress};
use solana_program::instruction::Instruction;
use solana_program::program_pack::Pack;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::system_instruction;
use spl_token::state::{Account as TokenAccount, Mint};
use tracing::debug;

/// On-chain layouts the factory knows how to size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountLayout {
    Mint,
    TokenAccount,
}

impl AccountLayout {
    pub fn span(&self) -> usize {
        match self {
            AccountLayout::Mint => Mint::LEN,
            AccountLayout::TokenAccount => TokenAccount::LEN,
        }
    }
}

/// A system-program `create_account` call, kept in structured form so the instruction
/// sequence can track what it allocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccount {
    pub payer: Pubkey,
    pub account: Pubkey,
    pub lamports: Lamports,
    pub space: usize,
    pub owner: Pubkey,
}

impl CreateAccount {
    pub fn to_instruction(&self) -> Instruction {
        system_instruction::create_account(
            &self.payer,
            &self.account,
            self.lamports,
            self.space as u64,
            &self.owner,
        )
    }
}

/// Generates a fresh account keypair and the rent-exempt `create_account` call sizing it
/// for `layout`, owned by `token_program`.
pub async fn create_account_for(
    client: &dyn LedgerClient,
    keys: &dyn KeySource,
    payer: &Pubkey,
    layout: AccountLayout,
    token_program: &TokenProgramAddress,
) -> ReproResult<(Keypair, CreateAccount)> {
    let account = keys.new_keypair();
    let space = layout.span();
    let lamports = client.minimum_balance_for_rent_exemption(space).await?;
    debug!(
        "Sizing {:?} account {}: {} bytes, {} lamports",
        layout,
        account.pubkey(),
        space,
        lamports
    );

    let create = CreateAccount {
        payer: *payer,
        account: account.pubkey(),
        lamports,
        space,
        owner: *token_program,
    };
    Ok((account, create))
}
