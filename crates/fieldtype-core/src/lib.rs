//! # fieldtype-core — Value Type Inference for Dataset Filters
//!
//! Given one raw value from a heterogeneous dataset, decide which of a fixed
//! set of type tags describes it. A filter UI uses the tag to pick a filter
//! control, most importantly a date picker for values that look like dates.
//!
//! ## Key Design Principles
//!
//! 1. **Total classification.** [`classify`] never fails and never panics.
//!    Date parser errors are "no match" for the rule that raised them.
//!
//! 2. **Ordered rule table.** Rules are named predicate → tag entries in
//!    [`classifier::RULES`], split into a base phase and a date override
//!    phase. Later matches win. [`explain`] reports which rules fired.
//!
//! 3. **Browser-compatible date parsing.** The override rules depend on a
//!    lenient timestamp parser ([`temporal::parse_lenient`]), a strict
//!    format list ([`temporal::DATE_FORMATS`]) and an epoch-seconds reader
//!    ([`temporal::parse_epoch_seconds`]). None of them consult the host
//!    time zone.
//!
//! 4. **String forms as JavaScript renders them.** Numbers are measured in
//!    their shortest round-trip rendering ([`number::format_number`]), so
//!    `1e21` is five characters and `0.1` is three.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No shared state: every public type is `Send + Sync`.

pub mod classifier;
pub mod error;
pub mod inspect;
pub mod number;
pub mod tag;
pub mod temporal;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use classifier::{classify, explain, Classification, RuleId};
pub use error::{DateParseError, FieldTypeError};
pub use inspect::{inspect, FieldOption, FilterWidget, InspectOptions};
pub use tag::TypeTag;
pub use value::RawValue;
