//! # IO Module
//!
//! Boundary between the public JSON shapes in `shared` and the domain models.
//!
//! Backups and the `--json` CLI output speak the `shared` DTOs; services speak
//! domain types. The mappers here translate in both directions and reject DTOs
//! that cannot become valid domain values (for example a malformed date).

pub mod mappers;

pub use mappers::*;
