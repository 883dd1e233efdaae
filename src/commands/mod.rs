//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - tui: Interactive comparison screen
//! - calc: One-shot comparison of PRICE/AMOUNT pairs
//! - config: Configuration display and validation

pub mod calc;
pub mod config;
pub mod tui;
