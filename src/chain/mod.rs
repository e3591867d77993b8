pub mod account;
pub mod confirmation;
pub mod instruction;
pub mod transaction;
