//! # Storage Module
//!
//! Data persistence for the P&L tracker. Records and the custom expense
//! structure live as two JSON documents in the data directory:
//!
//! ```text
//! data/
//! ├── records.json            ← every daily record
//! └── custom-structure.json   ← saved expense items per category
//! ```
//!
//! The domain layer depends on the traits in [`traits`], never on the JSON
//! implementation directly.

pub mod json;
pub mod traits;

pub use json::JsonConnection;
pub use traits::{Connection, RecordStorage, StructureStorage};
