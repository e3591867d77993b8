pub mod account_meta;
