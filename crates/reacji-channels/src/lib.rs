//! # reacji-channels
//!
//! Chat platform integrations for reacjilator.

pub mod slack;
