//! Error types

mod config;
mod field;
mod record;
mod table;

pub use config::*;
pub use field::*;
pub use record::*;
pub use table::*;
