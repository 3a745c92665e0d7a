use crate::domain::models::child::Child as DomainChild;
use shared::Child as ChildDto;

/// Maps child domain models to their public DTO representation
pub struct ChildMapper;

impl ChildMapper {
    pub fn to_dto(child: DomainChild) -> ChildDto {
        ChildDto {
            id: child.id,
            name: child.name,
            date_of_birth: child.date_of_birth.format("%Y-%m-%d").to_string(),
            weight_kg: child.weight_kg,
            created_at: child.created_at.to_rfc3339(),
            updated_at: child.updated_at.to_rfc3339(),
        }
    }
}
