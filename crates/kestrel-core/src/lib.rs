//! Core types and definitions for the KESTREL targeting pipeline.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, enums, configuration records, operator commands,
//! state snapshots, errors, and constants. It has no dependency on any
//! host or runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod geometry;
pub mod state;
pub mod types;
