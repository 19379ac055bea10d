//! # reacji-core
//!
//! Core types, traits, configuration, and error handling for reacjilator.

pub mod config;
pub mod error;
pub mod event;
pub mod language;
pub mod traits;
