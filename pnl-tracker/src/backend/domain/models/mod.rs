pub mod record;
pub mod structure;
