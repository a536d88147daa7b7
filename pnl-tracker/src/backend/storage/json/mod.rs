//! JSON-file storage backend.

pub mod connection;
pub mod record_repository;
pub mod structure_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use record_repository::JsonRecordRepository;
pub use structure_repository::JsonStructureRepository;
