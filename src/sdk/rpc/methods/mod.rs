pub mod account;
pub mod block;
pub mod transaction;
