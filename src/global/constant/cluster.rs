pub struct Cluster;

impl Cluster {
    pub const DEVNET: &'static str = "https://api.devnet.solana.com";
    pub const LOCALNET: &'static str = "http://127.0.0.1:8899";
}
