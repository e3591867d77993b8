use crate::chain::confirmation::ConfirmationPolicy;
use crate::chain::transaction::SubmissionOptions;
use crate::error::{ReproError, ReproResult};
use crate::global::constant::cluster::Cluster;
use crate::global::constant::mint::MintParams;
use crate::global::constant::token_program::TokenProgram;
use serde::Deserialize;
use solana_program::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ReproConfig {
    pub solana_rpc_url: String,
    pub token_program_id: Pubkey,
    pub repro_program_id: Pubkey,
    pub airdrop_lamports: u64,
    #[serde(skip)]
    pub submission: SubmissionOptions,
}

impl ReproConfig {
    pub fn new(repro_program_id: Pubkey) -> Self {
        Self {
            solana_rpc_url: Cluster::DEVNET.to_string(),
            token_program_id: TokenProgram::SPL_TOKEN,
            repro_program_id,
            airdrop_lamports: MintParams::AIRDROP_LAMPORTS,
            submission: SubmissionOptions::default(),
        }
    }

    pub fn load_from_env() -> ReproResult<Self> {
        dotenv::dotenv().ok();
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup so it can be exercised without
    /// touching the process environment.
    pub fn load_with<F>(lookup: F) -> ReproResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repro_program_id = lookup("REPRO_PROGRAM_ID")
            .ok_or_else(|| ReproError::Config("REPRO_PROGRAM_ID is not set".to_string()))
            .and_then(|v| parse_pubkey("REPRO_PROGRAM_ID", &v))?;

        let mut config = Self::new(repro_program_id);

        if let Some(url) = lookup("SOLANA_RPC_URL") {
            config.solana_rpc_url = url;
        }
        if let Some(v) = lookup("TOKEN_PROGRAM_ID") {
            config.token_program_id = parse_pubkey("TOKEN_PROGRAM_ID", &v)?;
        }
        if let Some(v) = lookup("AIRDROP_LAMPORTS") {
            config.airdrop_lamports = parse_number("AIRDROP_LAMPORTS", &v)?;
        }

        let mut policy = ConfirmationPolicy::default();
        if let Some(v) = lookup("CONFIRM_TIMEOUT_SECS") {
            policy.timeout = Duration::from_secs(parse_number("CONFIRM_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("CONFIRM_POLL_MS") {
            policy.poll_interval = Duration::from_millis(parse_number("CONFIRM_POLL_MS", &v)?);
        }
        config.submission.confirmation = policy;

        Ok(config)
    }
}

fn parse_pubkey(key: &str, value: &str) -> ReproResult<Pubkey> {
    Pubkey::from_str(value.trim())
        .map_err(|e| ReproError::Config(format!("{} is not a valid address: {}", key, e)))
}

fn parse_number(key: &str, value: &str) -> ReproResult<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ReproError::Config(format!("{} is not a number: {}", key, e)))
}
