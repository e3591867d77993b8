use crate::chain::account::{AccountLayout, CreateAccount};
use crate::error::{ReproError, ReproResult};
use crate::util::alias::{MintAddress, TokenAccountAddress, TokenProgramAddress};
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy)]
struct Allocation {
    owner: Pubkey,
    space: usize,
}

/// Append-only instruction list that refuses appends which would run before the state
/// they depend on exists: an account must be allocated before it is initialized, and a
/// mint and its token accounts must be initialized before anything mints into them.
///
/// Appends never reorder or deduplicate.
#[derive(Debug, Default)]
pub struct InstructionSequence {
    instructions: Vec<Instruction>,
    allocated: HashMap<Pubkey, Allocation>,
    mints: HashSet<MintAddress>,
    token_accounts: HashMap<TokenAccountAddress, MintAddress>,
}

impl InstructionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, create: &CreateAccount) -> ReproResult<()> {
        if self.allocated.contains_key(&create.account) {
            return Err(ReproError::OutOfOrder(format!(
                "account {} is already allocated",
                create.account
            )));
        }
        self.instructions.push(create.to_instruction());
        self.allocated.insert(
            create.account,
            Allocation {
                owner: create.owner,
                space: create.space,
            },
        );
        Ok(())
    }

    pub fn initialize_mint(
        &mut self,
        token_program: &TokenProgramAddress,
        mint: &MintAddress,
        mint_authority: &Pubkey,
        freeze_authority: Option<&Pubkey>,
        decimals: u8,
    ) -> ReproResult<()> {
        self.expect_allocated(mint, token_program, AccountLayout::Mint)?;
        if self.mints.contains(mint) {
            return Err(ReproError::OutOfOrder(format!(
                "mint {} is already initialized",
                mint
            )));
        }
        let ix = spl_token::instruction::initialize_mint(
            token_program,
            mint,
            mint_authority,
            freeze_authority,
            decimals,
        )?;
        self.instructions.push(ix);
        self.mints.insert(*mint);
        Ok(())
    }

    pub fn initialize_account(
        &mut self,
        token_program: &TokenProgramAddress,
        account: &TokenAccountAddress,
        mint: &MintAddress,
        owner: &Pubkey,
    ) -> ReproResult<()> {
        self.expect_allocated(account, token_program, AccountLayout::TokenAccount)?;
        if self.token_accounts.contains_key(account) {
            return Err(ReproError::OutOfOrder(format!(
                "token account {} is already initialized",
                account
            )));
        }
        self.expect_mint(mint)?;
        let ix = spl_token::instruction::initialize_account(token_program, account, mint, owner)?;
        self.instructions.push(ix);
        self.token_accounts.insert(*account, *mint);
        Ok(())
    }

    pub fn mint_to(
        &mut self,
        token_program: &TokenProgramAddress,
        mint: &MintAddress,
        account: &TokenAccountAddress,
        authority: &Pubkey,
        amount: u64,
    ) -> ReproResult<()> {
        self.expect_mint(mint)?;
        match self.token_accounts.get(account) {
            Some(account_mint) if account_mint == mint => {}
            Some(account_mint) => {
                return Err(ReproError::OutOfOrder(format!(
                    "token account {} holds mint {}, not {}",
                    account, account_mint, mint
                )))
            }
            None => {
                return Err(ReproError::OutOfOrder(format!(
                    "mint_to targets token account {} before it is initialized",
                    account
                )))
            }
        }
        let ix = spl_token::instruction::mint_to(token_program, mint, account, authority, &[], amount)?;
        self.instructions.push(ix);
        Ok(())
    }

    /// Appends an application instruction that reads the given token accounts' initialized
    /// state.
    pub fn push_after_token_accounts(
        &mut self,
        ix: Instruction,
        token_accounts: &[TokenAccountAddress],
    ) -> ReproResult<()> {
        if let Some(missing) = token_accounts
            .iter()
            .find(|a| !self.token_accounts.contains_key(*a))
        {
            return Err(ReproError::OutOfOrder(format!(
                "instruction for program {} references token account {} before it is initialized",
                ix.program_id, missing
            )));
        }
        self.instructions.push(ix);
        Ok(())
    }

    /// Appends without any ordering check.
    pub fn push_custom(&mut self, ix: Instruction) {
        self.instructions.push(ix);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    fn expect_allocated(
        &self,
        account: &Pubkey,
        token_program: &TokenProgramAddress,
        layout: AccountLayout,
    ) -> ReproResult<()> {
        let allocation = self.allocated.get(account).ok_or_else(|| {
            ReproError::OutOfOrder(format!(
                "{:?} account {} is initialized before it is allocated",
                layout, account
            ))
        })?;
        if allocation.owner != *token_program {
            return Err(ReproError::OutOfOrder(format!(
                "account {} is owned by {}, expected {}",
                account, allocation.owner, token_program
            )));
        }
        if allocation.space != layout.span() {
            return Err(ReproError::OutOfOrder(format!(
                "account {} has {} bytes, {:?} needs {}",
                account,
                allocation.space,
                layout,
                layout.span()
            )));
        }
        Ok(())
    }

    fn expect_mint(&self, mint: &MintAddress) -> ReproResult<()> {
        if self.mints.contains(mint) {
            Ok(())
        } else {
            Err(ReproError::OutOfOrder(format!(
                "mint {} is used before it is initialized",
                mint
            )))
        }
    }
}
