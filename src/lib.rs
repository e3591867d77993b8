pub mod chain;
pub mod error;
pub mod global;
pub mod pipeline;
pub mod program;
pub mod sdk;
pub mod util;
