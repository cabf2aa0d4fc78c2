//! Request middleware.
//!
//! Purpose: attach a trace identifier to every request and response.

pub mod trace;

pub use trace::Trace;
