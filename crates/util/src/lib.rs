//! treemap-util - test support for the treemap workspace
//!
//! A reproducible [`Fuzzer`] and the [`TraceOp`] operation traces it generates
//! for driving ordered collections against a reference model.

pub mod fuzzer;
pub mod trace;

pub use fuzzer::Fuzzer;
pub use trace::TraceOp;
