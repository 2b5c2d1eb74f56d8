//! Verification cache shared by every request handled by the process.

pub mod verdict;


pub use verdict::{VerificationCache, VerificationCacheHandle};
