pub mod cs;

pub use cs::ecc::hamming;
pub use cs::error::{Error, Result};
