use crate::chain::confirmation::{await_confirmation, ConfirmationPolicy};
use crate::error::{ReproError, ReproResult};
use crate::sdk::ledger::LedgerClient;
use async_trait::async_trait;
use solana_program::hash::Hash;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::message::Message;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOptions {
    pub skip_preflight: bool,
    pub commitment: CommitmentConfig,
    pub await_confirmation: bool,
    pub confirmation: ConfirmationPolicy,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self {
            skip_preflight: true,
            // "max"
            commitment: CommitmentConfig::finalized(),
            await_confirmation: true,
            confirmation: ConfirmationPolicy::default(),
        }
    }
}

/// A signer whose private key lives outside this process.
#[async_trait]
pub trait ExternalWallet: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    async fn sign_transaction(&self, tx: Transaction) -> ReproResult<Transaction>;
}

pub enum TxSigner<'a> {
    Local(&'a Keypair),
    External(&'a dyn ExternalWallet),
}

impl TxSigner<'_> {
    pub fn pubkey(&self) -> Pubkey {
        match self {
            TxSigner::Local(keypair) => keypair.pubkey(),
            TxSigner::External(wallet) => wallet.pubkey(),
        }
    }
}

/// The first external wallet pays when present, otherwise the first local signer.
pub fn fee_payer(signers: &[TxSigner<'_>]) -> ReproResult<Pubkey> {
    signers
        .iter()
        .find(|s| matches!(s, TxSigner::External(_)))
        .or_else(|| signers.first())
        .map(TxSigner::pubkey)
        .ok_or(ReproError::NoFeePayer)
}

pub fn build_unsigned(instructions: &[Instruction], payer: &Pubkey, blockhash: Hash) -> Transaction {
    let message = Message::new_with_blockhash(instructions, Some(payer), &blockhash);
    Transaction::new_unsigned(message)
}

/// Local keypairs sign first, then every external wallet in the order given.
pub async fn sign(mut tx: Transaction, signers: &[TxSigner<'_>]) -> ReproResult<Transaction> {
    let locals: Vec<&Keypair> = signers
        .iter()
        .filter_map(|s| match s {
            TxSigner::Local(keypair) => Some(*keypair),
            TxSigner::External(_) => None,
        })
        .collect();

    if !locals.is_empty() {
        let blockhash = tx.message.recent_blockhash;
        tx.try_partial_sign(locals.as_slice(), blockhash)
            .map_err(|e| ReproError::Signing(e.to_string()))?;
    }

    for signer in signers {
        if let TxSigner::External(wallet) = signer {
            tx = wallet.sign_transaction(tx).await?;
        }
    }

    if !tx.is_signed() {
        let required = tx.message.header.num_required_signatures as usize;
        let missing: Vec<String> = tx
            .message
            .account_keys
            .iter()
            .take(required)
            .zip(tx.signatures.iter())
            .filter(|(_, sig)| **sig == Signature::default())
            .map(|(key, _)| key.to_string())
            .collect();
        return Err(ReproError::Signing(format!(
            "missing signatures for {}",
            missing.join(", ")
        )));
    }
    Ok(tx)
}

pub fn serialize(tx: &Transaction) -> ReproResult<Vec<u8>> {
    bincode::serialize(tx).map_err(|e| ReproError::Serialization(e.to_string()))
}

/// Builds, signs and submits `instructions` as one atomic transaction.
///
/// Nothing is retried; the first failing step ends the call.
pub async fn submit(
    client: &dyn LedgerClient,
    instructions: &[Instruction],
    signers: &[TxSigner<'_>],
    options: &SubmissionOptions,
) -> ReproResult<Signature> {
    let payer = fee_payer(signers)?;

    let blockhash = client.latest_blockhash(CommitmentConfig::finalized()).await?;
    debug!(
        "Building transaction: {} instructions, payer {}, blockhash {}",
        instructions.len(),
        payer,
        blockhash
    );

    let tx = sign(build_unsigned(instructions, &payer, blockhash), signers).await?;
    let raw = serialize(&tx)?;
    debug!("Serialized transaction: {} bytes", raw.len());

    let txid = client
        .send_raw_transaction(&raw, options)
        .await
        .map_err(|e| match e {
            ReproError::Submission {
                signature: None,
                status,
            } => ReproError::Submission {
                signature: tx.signatures.first().copied(),
                status,
            },
            other => other,
        })?;

    info!("Transaction id: {}", txid);

    if options.await_confirmation {
        await_confirmation(
            client,
            &txid,
            options.commitment,
            Some(&blockhash),
            &options.confirmation,
        )
        .await?;
    }

    Ok(txid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::wallet::KeypairWallet;
    use crate::test::stub_client::{seeded_keypair, StubLedgerClient};
    use crate::util::traits::account_meta::ToAccountMeta;
    use solana_sdk::instruction::InstructionError;
    use solana_sdk::system_instruction;
    use solana_sdk::transaction::TransactionError;

    struct FailingWallet(Pubkey);

    #[async_trait]
    impl ExternalWallet for FailingWallet {
        fn pubkey(&self) -> Pubkey {
            self.0
        }

        async fn sign_transaction(&self, _tx: Transaction) -> ReproResult<Transaction> {
            Err(ReproError::Signing("user rejected the request".to_string()))
        }
    }

    fn two_signer_instructions(payer: &Keypair, other: &Keypair) -> Vec<Instruction> {
        vec![
            system_instruction::transfer(&payer.pubkey(), &other.pubkey(), 10),
            Instruction::new_with_bytes(
                Pubkey::new_unique(),
                &[1, 2, 3],
                vec![other.pubkey().to_readonly_signer()],
            ),
            system_instruction::transfer(&other.pubkey(), &payer.pubkey(), 5),
        ]
    }

    #[tokio::test]
    async fn test_zero_signers_fails_before_network() {
        let client = StubLedgerClient::new();
        let ix = Instruction::new_with_bytes(Pubkey::new_unique(), &[0], vec![]);

        let err = submit(&client, &[ix], &[], &SubmissionOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ReproError::NoFeePayer));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_returns_stub_txid() {
        let client = StubLedgerClient::new();
        let payer = seeded_keypair(1);
        let other = seeded_keypair(2);
        let ixs = two_signer_instructions(&payer, &other);

        let txid = submit(
            &client,
            &ixs,
            &[TxSigner::Local(&payer), TxSigner::Local(&other)],
            &SubmissionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(txid, client.signature());
        assert_eq!(
            client.calls(),
            vec!["latest_blockhash", "send_raw_transaction", "signature_status"]
        );

        let sent = client.sent_transactions();
        assert_eq!(sent.len(), 1);
        let tx = &sent[0];
        assert_eq!(tx.message.recent_blockhash, client.blockhash());
        assert_eq!(tx.message.account_keys[0], payer.pubkey());
        assert_eq!(tx.message.account_keys[1], other.pubkey());
        assert_eq!(tx.message.instructions.len(), 3);
        assert_eq!(tx.message.instructions[1].data, vec![1, 2, 3]);
        assert!(tx.verify().is_ok());
    }

    #[tokio::test]
    async fn test_failed_status_surfaces_submission_error() {
        let client = StubLedgerClient::new().with_status(Some(Err(
            TransactionError::InstructionError(2, InstructionError::InvalidAccountData),
        )));
        let payer = seeded_keypair(3);
        let other = seeded_keypair(4);

        let err = submit(
            &client,
            &two_signer_instructions(&payer, &other),
            &[TxSigner::Local(&payer), TxSigner::Local(&other)],
            &SubmissionOptions::default(),
        )
        .await
        .unwrap_err();

        match err {
            ReproError::Submission { signature, status } => {
                assert_eq!(signature, Some(client.signature()));
                assert!(status.contains("InvalidAccountData"));
            }
            other => panic!("expected submission error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_confirmation_when_not_awaited() {
        let client = StubLedgerClient::new().with_status(None);
        let payer = seeded_keypair(5);
        let options = SubmissionOptions {
            await_confirmation: false,
            ..SubmissionOptions::default()
        };
        let ix = system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 1);

        submit(&client, &[ix], &[TxSigner::Local(&payer)], &options)
            .await
            .unwrap();
        assert_eq!(client.status_queries(), 0);
    }

    #[tokio::test]
    async fn test_preflight_variant_keeps_order_and_signers() {
        let payer = seeded_keypair(6);
        let other = seeded_keypair(7);
        let ixs = two_signer_instructions(&payer, &other);
        let signers = [TxSigner::Local(&payer), TxSigner::Local(&other)];

        let skipping = StubLedgerClient::new();
        submit(&skipping, &ixs, &signers, &SubmissionOptions::default())
            .await
            .unwrap();

        let simulating = StubLedgerClient::new().with_blockhash(skipping.blockhash());
        let options = SubmissionOptions {
            skip_preflight: false,
            ..SubmissionOptions::default()
        };
        submit(&simulating, &ixs, &signers, &options).await.unwrap();

        let a = &skipping.sent_transactions()[0];
        let b = &simulating.sent_transactions()[0];
        assert_eq!(a.message, b.message);
        assert_eq!(a.signatures, b.signatures);
        assert!(skipping.sent_options()[0].skip_preflight);
        assert!(!simulating.sent_options()[0].skip_preflight);
    }

    #[tokio::test]
    async fn test_external_wallet_pays_fees() {
        let client = StubLedgerClient::new();
        let wallet = KeypairWallet::new(seeded_keypair(8));
        let local = seeded_keypair(9);
        let ix = Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[7],
            vec![local.pubkey().to_signer()],
        );

        submit(
            &client,
            &[ix],
            &[TxSigner::Local(&local), TxSigner::External(&wallet)],
            &SubmissionOptions::default(),
        )
        .await
        .unwrap();

        let tx = &client.sent_transactions()[0];
        assert_eq!(tx.message.account_keys[0], ExternalWallet::pubkey(&wallet));
        assert_eq!(tx.message.account_keys[1], local.pubkey());
        assert_eq!(tx.message.header.num_required_signatures, 2);
        assert!(tx.verify().is_ok());
    }

    #[tokio::test]
    async fn test_wallet_failure_is_signing_error() {
        let client = StubLedgerClient::new();
        let wallet = FailingWallet(Pubkey::new_unique());
        let ix = Instruction::new_with_bytes(Pubkey::new_unique(), &[0], vec![]);

        let err = submit(
            &client,
            &[ix],
            &[TxSigner::External(&wallet)],
            &SubmissionOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ReproError::Signing(_)));
        assert!(client.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_signer() {
        let client = StubLedgerClient::new();
        let payer = seeded_keypair(10);
        let absent = seeded_keypair(11);

        let err = submit(
            &client,
            &two_signer_instructions(&payer, &absent),
            &[TxSigner::Local(&payer)],
            &SubmissionOptions::default(),
        )
        .await
        .unwrap_err();

        match err {
            ReproError::Signing(msg) => assert!(msg.contains(&absent.pubkey().to_string())),
            other => panic!("expected signing error, got {:?}", other),
        }
        assert!(client.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_send_carries_local_signature() {
        let client = StubLedgerClient::new().rejecting("Blockhash not found");
        let payer = seeded_keypair(12);
        let ix = system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 1);

        let err = submit(
            &client,
            &[ix],
            &[TxSigner::Local(&payer)],
            &SubmissionOptions::default(),
        )
        .await
        .unwrap_err();

        match err {
            ReproError::Submission { signature, status } => {
                assert!(signature.is_some());
                assert!(status.contains("Blockhash not found"));
            }
            other => panic!("expected submission error, got {:?}", other),
        }
        assert_eq!(client.status_queries(), 0);
    }

    #[test]
    fn test_fee_payer_selection() {
        let a = seeded_keypair(13);
        let b = seeded_keypair(14);
        let wallet = KeypairWallet::new(seeded_keypair(15));

        assert_eq!(
            fee_payer(&[TxSigner::Local(&a), TxSigner::Local(&b)]).unwrap(),
            a.pubkey()
        );
        assert_eq!(
            fee_payer(&[TxSigner::Local(&a), TxSigner::External(&wallet)]).unwrap(),
            ExternalWallet::pubkey(&wallet)
        );
        assert!(matches!(fee_payer(&[]), Err(ReproError::NoFeePayer)));
    }
}
