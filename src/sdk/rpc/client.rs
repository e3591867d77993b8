use crate::chain::transaction::SubmissionOptions;
use crate::error::ReproResult;
use crate::sdk::ledger::LedgerClient;
use crate::sdk::rpc::methods::{account, block, transaction};
use crate::util::alias::Lamports;
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::TransactionError;
use std::sync::Arc;

pub struct RpcLedgerClient {
    rpc: Arc<RpcClient>,
}

impl RpcLedgerClient {
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: Arc::new(RpcClient::new_with_commitment(url.into(), commitment)),
        }
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn request_airdrop(&self, to: &Pubkey, lamports: Lamports) -> ReproResult<Signature> {
        account::request_airdrop(&self.rpc, to, lamports).await
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> ReproResult<Lamports> {
        account::minimum_balance_for_rent_exemption(&self.rpc, data_len).await
    }

    async fn latest_blockhash(&self, commitment: CommitmentConfig) -> ReproResult<Hash> {
        block::get_latest_blockhash(&self.rpc, commitment).await
    }

    async fn is_blockhash_valid(
        &self,
        blockhash: &Hash,
        commitment: CommitmentConfig,
    ) -> ReproResult<bool> {
        block::is_blockhash_valid(&self.rpc, blockhash, commitment).await
    }

    async fn send_raw_transaction(
        &self,
        raw: &[u8],
        options: &SubmissionOptions,
    ) -> ReproResult<Signature> {
        transaction::send_raw_transaction(&self.rpc, raw, options).await
    }

    async fn signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> ReproResult<Option<Result<(), TransactionError>>> {
        transaction::get_signature_status(&self.rpc, signature, commitment).await
    }
}
