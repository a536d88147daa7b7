pub mod record_mapper;
pub mod structure_mapper;

pub use record_mapper::RecordMapper;
pub use structure_mapper::StructureMapper;
