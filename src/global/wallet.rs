use crate::chain::transaction::ExternalWallet;
use crate::error::{ReproError, ReproResult};
use async_trait::async_trait;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use solana_sdk::transaction::Transaction;
use std::path::Path;

/// Where fresh account keypairs come from.
pub trait KeySource: Send + Sync {
    fn new_keypair(&self) -> Keypair;
}

pub struct RandomKeySource;

impl KeySource for RandomKeySource {
    fn new_keypair(&self) -> Keypair {
        Keypair::new()
    }
}

/// A keypair held outside the local signer set, signing through the wallet interface.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ReproResult<Self> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| {
            ReproError::Signing(format!("failed to read wallet {}: {}", path.display(), e))
        })?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl ExternalWallet for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_transaction(&self, mut tx: Transaction) -> ReproResult<Transaction> {
        let blockhash = tx.message.recent_blockhash;
        tx.try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| ReproError::Signing(e.to_string()))?;
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_keys_are_distinct() {
        let source = RandomKeySource;
        assert_ne!(source.new_keypair().pubkey(), source.new_keypair().pubkey());
    }

    #[test]
    fn test_missing_wallet_file() {
        let result = KeypairWallet::from_file("/nonexistent/wallet.json");
        assert!(matches!(result, Err(ReproError::Signing(_))));
    }
}
