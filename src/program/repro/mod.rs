pub mod ix;
