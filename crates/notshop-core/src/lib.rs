//! # notshop-core
//!
//! Core types, traits, configuration, and error handling for the notshop bot.

pub mod config;
pub mod error;
pub mod message;
pub mod traits;
