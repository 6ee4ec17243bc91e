//! Native support for the `cadence` CLI binary.
//!
//! - `args` - the command-line argument shape
//! - `driver` - the check-then-run pipeline
//! - `reporter` - diagnostic printing

pub mod args;
pub mod driver;
pub mod reporter;
