use crate::chain::account::{create_account_for, AccountLayout};
use crate::chain::confirmation::await_confirmation;
use crate::chain::instruction::InstructionSequence;
use crate::chain::transaction::{submit, TxSigner};
use crate::error::{ReproError, ReproResult};
use crate::global::constant::mint::MintParams;
use crate::global::wallet::KeySource;
use crate::program::repro::ix::ReproInstruction;
use crate::sdk::ledger::LedgerClient;
use crate::util::alias::{MintAddress, TokenProgramAddress};
use crate::util::env::env_config::ReproConfig;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::{Keypair, Signature, Signer};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReproReport {
    pub admin: Pubkey,
    pub mint: MintAddress,
    pub token_account: Pubkey,
    pub airdrop_signature: Signature,
    pub signature: Signature,
}

/// `supply` whole tokens expressed in base units.
pub fn initial_supply_amount(supply: u64, decimals: u8) -> ReproResult<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|scale| supply.checked_mul(scale))
        .ok_or(ReproError::AmountOverflow { supply, decimals })
}

pub async fn new_mint(
    client: &dyn LedgerClient,
    keys: &dyn KeySource,
    seq: &mut InstructionSequence,
    token_program: &TokenProgramAddress,
    decimals: u8,
    authority: &Pubkey,
    payer: &Pubkey,
) -> ReproResult<Keypair> {
    let (mint, create) =
        create_account_for(client, keys, payer, AccountLayout::Mint, token_program).await?;
    seq.allocate(&create)?;
    seq.initialize_mint(token_program, &mint.pubkey(), authority, None, decimals)?;
    Ok(mint)
}

pub async fn new_token_account(
    client: &dyn LedgerClient,
    keys: &dyn KeySource,
    seq: &mut InstructionSequence,
    token_program: &TokenProgramAddress,
    mint: &MintAddress,
    owner: &Pubkey,
    payer: &Pubkey,
) -> ReproResult<Keypair> {
    let (account, create) =
        create_account_for(client, keys, payer, AccountLayout::TokenAccount, token_program)
            .await?;
    seq.allocate(&create)?;
    seq.initialize_account(token_program, &account.pubkey(), mint, owner)?;
    Ok(account)
}

/// Funds a fresh admin, creates a mint and a token account, mints the initial supply,
/// appends the repro instruction and submits everything as one transaction.
pub async fn run(
    config: &ReproConfig,
    client: &dyn LedgerClient,
    keys: &dyn KeySource,
) -> ReproResult<ReproReport> {
    let token_program = config.token_program_id;

    let admin = keys.new_keypair();
    info!("Admin Account: {}", admin.pubkey());

    let airdrop_signature = client
        .request_airdrop(&admin.pubkey(), config.airdrop_lamports)
        .await?;
    info!("Airdrop tx: {}", airdrop_signature);
    await_confirmation(
        client,
        &airdrop_signature,
        CommitmentConfig::confirmed(),
        None,
        &config.submission.confirmation,
    )
    .await?;

    let authority = admin.pubkey();
    let owner = admin.pubkey();
    let payer = admin.pubkey();

    let mut seq = InstructionSequence::new();

    let mint = new_mint(
        client,
        keys,
        &mut seq,
        &token_program,
        MintParams::PRECISION,
        &authority,
        &payer,
    )
    .await?;
    info!("Mint: {}", mint.pubkey());

    let token_account = new_token_account(
        client,
        keys,
        &mut seq,
        &token_program,
        &mint.pubkey(),
        &owner,
        &payer,
    )
    .await?;
    info!("Token Account: {}", token_account.pubkey());

    let amount = initial_supply_amount(MintParams::INITIAL_SUPPLY, MintParams::PRECISION)?;
    seq.mint_to(
        &token_program,
        &mint.pubkey(),
        &token_account.pubkey(),
        &authority,
        amount,
    )?;

    seq.push_after_token_accounts(
        ReproInstruction::initialize_token(
            &config.repro_program_id,
            &admin.pubkey(),
            &token_account.pubkey(),
        ),
        &[token_account.pubkey()],
    )?;

    let signature = submit(
        client,
        seq.instructions(),
        &[
            TxSigner::Local(&admin),
            TxSigner::Local(&mint),
            TxSigner::Local(&token_account),
        ],
        &config.submission,
    )
    .await?;

    Ok(ReproReport {
        admin: admin.pubkey(),
        mint: mint.pubkey(),
        token_account: token_account.pubkey(),
        airdrop_signature,
        signature,
    })
}
