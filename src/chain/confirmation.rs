use crate::error::{ReproError, ReproResult};
use crate::sdk::ledger::LedgerClient;
use serde_json::json;
use solana_program::hash::Hash;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Polls until `signature` reaches `commitment`.
///
/// With a `blockhash`, a transaction that is still unseen once its blockhash stops being
/// valid is reported as [`ReproError::Expired`]; it can no longer land.
pub async fn await_confirmation(
    client: &dyn LedgerClient,
    signature: &Signature,
    commitment: CommitmentConfig,
    blockhash: Option<&Hash>,
    policy: &ConfirmationPolicy,
) -> ReproResult<()> {
    let started = Instant::now();

    loop {
        match client.signature_status(signature, commitment).await? {
            Some(Ok(())) => {
                debug!(
                    "{} reached {:?} after {} ms",
                    signature,
                    commitment.commitment,
                    started.elapsed().as_millis()
                );
                return Ok(());
            }
            Some(Err(err)) => {
                return Err(ReproError::Submission {
                    signature: Some(*signature),
                    status: json!({ "err": err }).to_string(),
                })
            }
            None => {}
        }

        if let Some(blockhash) = blockhash {
            if !client.is_blockhash_valid(blockhash, commitment).await? {
                return Err(ReproError::Expired(*signature));
            }
        }

        let waited = started.elapsed();
        if waited >= policy.timeout {
            return Err(ReproError::ConfirmationTimeout {
                signature: *signature,
                waited_ms: waited.as_millis(),
            });
        }
        tokio::time::sleep(policy.poll_interval).await;
    }
}
