pub mod cluster;
pub mod mint;
pub mod token_program;
