//! Common utilities for the facelift page decorator.
//!
//! This crate provides shared infrastructure used by the other components:
//! - **Warning System** - colored terminal output for unsupported features

pub mod warning;
