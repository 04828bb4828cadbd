//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod check;
pub mod format;
pub mod info;
pub mod score;
