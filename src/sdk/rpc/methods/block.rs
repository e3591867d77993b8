use crate::error::ReproResult;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::hash::Hash;
use solana_sdk::commitment_config::CommitmentConfig;

pub async fn get_latest_blockhash(
    rpc: &RpcClient,
    commitment: CommitmentConfig,
) -> ReproResult<Hash> {
    let (blockhash, _last_valid_height) =
        rpc.get_latest_blockhash_with_commitment(commitment).await?;
    Ok(blockhash)
}

pub async fn is_blockhash_valid(
    rpc: &RpcClient,
    blockhash: &Hash,
    commitment: CommitmentConfig,
) -> ReproResult<bool> {
    Ok(rpc.is_blockhash_valid(blockhash, commitment).await?)
}
