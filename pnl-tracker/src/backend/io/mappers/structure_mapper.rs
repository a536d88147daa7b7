use crate::backend::domain::models::structure::CustomExpenseStructure as DomainStructure;
use shared::CustomExpenseStructure as SharedStructure;

/// Mapper to convert between the shared structure map and the domain wrapper.
pub struct StructureMapper;

impl StructureMapper {
    pub fn to_domain(dto: SharedStructure) -> DomainStructure {
        DomainStructure::from_map(dto)
    }

    pub fn to_dto(domain: DomainStructure) -> SharedStructure {
        domain.into_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_mapping_keeps_item_order() {
        let mut dto = SharedStructure::new();
        dto.insert("Meat".to_string(), vec!["Mutton".to_string(), "Beef".to_string()]);

        let domain = StructureMapper::to_domain(dto.clone());
        assert_eq!(domain.items_for("Meat").unwrap(), &["Mutton", "Beef"]);
        assert_eq!(StructureMapper::to_dto(domain), dto);
    }
}
