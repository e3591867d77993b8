use crate::chain::transaction::SubmissionOptions;
use crate::error::ReproResult;
use crate::util::alias::Lamports;
use async_trait::async_trait;
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::TransactionError;

/// The node operations the repro flow depends on. Implemented over JSON-RPC for real runs
/// and by a recording stub in tests.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn request_airdrop(&self, to: &Pubkey, lamports: Lamports) -> ReproResult<Signature>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> ReproResult<Lamports>;

    async fn latest_blockhash(&self, commitment: CommitmentConfig) -> ReproResult<Hash>;

    async fn is_blockhash_valid(
        &self,
        blockhash: &Hash,
        commitment: CommitmentConfig,
    ) -> ReproResult<bool>;

    /// Submits already serialized wire bytes.
    async fn send_raw_transaction(
        &self,
        raw: &[u8],
        options: &SubmissionOptions,
    ) -> ReproResult<Signature>;

    /// `None` while the node has not seen the signature at `commitment`.
    async fn signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> ReproResult<Option<Result<(), TransactionError>>>;
}
