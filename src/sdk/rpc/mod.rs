pub mod client;
pub mod methods;
