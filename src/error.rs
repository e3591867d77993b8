use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_request::RpcError;
use solana_program::program_error::ProgramError;
use solana_sdk::signature::Signature;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReproError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Transaction {} failed ({status})", display_signature(.signature))]
    Submission {
        signature: Option<Signature>,
        status: String,
    },

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Transaction has no fee payer: at least one signer is required")]
    NoFeePayer,

    #[error("Instruction out of order: {0}")]
    OutOfOrder(String),

    #[error("Failed to build instruction: {0}")]
    Instruction(#[from] ProgramError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Amount overflow: {supply} * 10^{decimals}")]
    AmountOverflow { supply: u64, decimals: u8 },

    #[error("Transaction {0} expired before it was confirmed")]
    Expired(Signature),

    #[error("Timed out after {waited_ms} ms waiting for {signature} to confirm")]
    ConfirmationTimeout { signature: Signature, waited_ms: u128 },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ReproResult<T> = Result<T, ReproError>;

fn display_signature(signature: &Option<Signature>) -> String {
    signature
        .map(|s| s.to_string())
        .unwrap_or_else(|| "<unsent>".to_string())
}

impl ReproError {
    /// Classifies an RPC failure. Only a node-side rejection of a send request counts
    /// as a submission failure; everything else is a transport problem.
    pub fn from_send(err: ClientError) -> Self {
        match err.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) => {
                ReproError::Submission {
                    signature: None,
                    status: format!("{{\"code\":{},\"message\":{:?}}}", code, message),
                }
            }
            ClientErrorKind::TransactionError(tx_err) => ReproError::Submission {
                signature: None,
                status: format!("{{\"err\":{:?}}}", tx_err),
            },
            _ => ReproError::Network(err.to_string()),
        }
    }
}

impl From<ClientError> for ReproError {
    fn from(err: ClientError) -> Self {
        ReproError::Network(err.to_string())
    }
}
