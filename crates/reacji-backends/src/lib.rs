//! # reacji-backends
//!
//! Translation backend implementations for reacjilator.

pub mod aws;
pub mod deepl;
pub mod google;
pub mod stub;
