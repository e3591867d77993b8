pub mod constant;
pub mod wallet;
