//! # fieldtype-cli — Command-Line Interface for fieldtype
//!
//! Exposes the classifier and the dataset inspector from `fieldtype-core`
//! for shell use and CI spot checks.
//!
//! ## Subcommands
//!
//! - `classify`: Tag one or more raw values, optionally with the rules
//!   that fired
//! - `inspect`: List the fields of a JSON dataset with their tags and
//!   filter widgets
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `fieldtype-core`; they only read input
//!   and render output.
//! - Handlers write to a caller-supplied writer so they can be tested
//!   without a process.

pub mod classify;
pub mod inspect;
pub mod output;
