//! Core data model, error type, and monetary utilities.
//!
//! The types here mirror the two result tables of the conference report:
//! the quadro resumo por item ([`ItemSummary`]) and the checklist
//! ([`CheckResult`]), plus the per-run [`ValidationParams`].

mod error;
pub mod money;
mod types;

pub use error::*;
pub use types::*;
