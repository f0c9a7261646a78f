//! Command line entry points: `serve` runs the API, `migrate` manages the schema.

pub mod args;

pub use args::{Cli, Commands};
