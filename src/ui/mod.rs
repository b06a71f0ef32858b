//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! Everything the user reads goes through this module so quiet mode and
//! `--json` are honoured consistently. Diagnostics go through `tracing`.

pub mod output;
