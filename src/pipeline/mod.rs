pub mod repro;
