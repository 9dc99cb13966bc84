//! # notshop-channels
//!
//! Messaging platform integrations for notshop.

pub mod telegram;
