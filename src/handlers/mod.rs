//! Command handlers
//!
//! One file per subcommand. Each handler prints its run summary on stdout and
//! returns the underlying result so callers (and tests) can inspect it.

pub mod dashboard;
pub mod organize;
pub mod stats;
pub mod update_readmes;
