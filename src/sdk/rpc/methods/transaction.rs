use crate::chain::transaction::SubmissionOptions;
use crate::error::{ReproError, ReproResult};
use base64::Engine;
use serde_json::json;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_client::rpc_request::RpcRequest;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::TransactionError;
use solana_transaction_status::UiTransactionEncoding;
use std::str::FromStr;
use tracing::debug;

pub fn send_config(options: &SubmissionOptions) -> RpcSendTransactionConfig {
    RpcSendTransactionConfig {
        skip_preflight: options.skip_preflight,
        preflight_commitment: Some(options.commitment.commitment),
        encoding: Some(UiTransactionEncoding::Base64),
        ..Default::default()
    }
}

pub async fn send_raw_transaction(
    rpc: &RpcClient,
    raw: &[u8],
    options: &SubmissionOptions,
) -> ReproResult<Signature> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(raw);
    debug!("Sending raw transaction of {} bytes", raw.len());

    let signature: String = rpc
        .send(
            RpcRequest::SendTransaction,
            json!([encoded, send_config(options)]),
        )
        .await
        .map_err(ReproError::from_send)?;

    Signature::from_str(&signature)
        .map_err(|e| ReproError::Network(format!("node returned bad signature {}: {}", signature, e)))
}

pub async fn get_signature_status(
    rpc: &RpcClient,
    signature: &Signature,
    commitment: CommitmentConfig,
) -> ReproResult<Option<Result<(), TransactionError>>> {
    Ok(rpc
        .get_signature_status_with_commitment(signature, commitment)
        .await?)
}
