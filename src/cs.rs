pub mod ecc;
pub mod error;

// Re-export all modules
pub use ecc::*;
