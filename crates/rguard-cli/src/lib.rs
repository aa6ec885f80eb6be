//! # rguard-cli — Operator Tooling
//!
//! Subcommand handlers for the `rguard` binary. Each module owns one
//! subcommand's argument struct and handler.

pub mod demo;
pub mod derive;
