pub mod ledger;
pub mod rpc;
