use crate::error::ReproResult;
use crate::util::alias::Lamports;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;

pub async fn request_airdrop(
    rpc: &RpcClient,
    to: &Pubkey,
    lamports: Lamports,
) -> ReproResult<Signature> {
    Ok(rpc.request_airdrop(to, lamports).await?)
}

pub async fn minimum_balance_for_rent_exemption(
    rpc: &RpcClient,
    data_len: usize,
) -> ReproResult<Lamports> {
    Ok(rpc.get_minimum_balance_for_rent_exemption(data_len).await?)
}
