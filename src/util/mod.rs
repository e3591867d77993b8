pub mod alias;
pub mod env;
pub mod traits;
