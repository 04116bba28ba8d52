//! Command handlers module.
//!
//! - `io.rs`: import, export and offline conversion
//! - `sets.rs`: local set listing

mod io;
mod sets;

pub use io::{cmd_convert, cmd_export, cmd_import};
pub use sets::cmd_sets;
