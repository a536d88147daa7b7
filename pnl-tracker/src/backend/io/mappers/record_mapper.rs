use crate::backend::domain::models::record::{
    DailyRecord as DomainRecord, ExpenseCategory as DomainCategory, ExpenseItem as DomainItem,
    RecordValidationError, RECORD_DATE_FORMAT,
};
use shared::{
    DailyRecord as SharedRecord, ExpenseCategory as SharedCategory, ExpenseItem as SharedItem,
};
use tracing::warn;

/// Mapper to convert between shared DailyRecord DTOs and domain records.
pub struct RecordMapper;

impl RecordMapper {
    /// Converts a shared record to a domain record, parsing its ISO date.
    ///
    /// The id is always re-derived from the date so a record can never end up
    /// stored under a key that disagrees with its day.
    pub fn to_domain(dto: SharedRecord) -> Result<DomainRecord, RecordValidationError> {
        let date = DomainRecord::parse_date(&dto.date)?;
        let id = DomainRecord::id_for_date(date);
        if dto.id != id {
            warn!("Record id '{}' does not match its date {}, using the date", dto.id, id);
        }

        Ok(DomainRecord {
            id,
            date,
            total_sales: dto.total_sales,
            expenses: dto.expenses.into_iter().map(Self::category_to_domain).collect(),
        })
    }

    pub fn to_dto(domain: DomainRecord) -> SharedRecord {
        SharedRecord {
            id: domain.id,
            date: domain.date.format(RECORD_DATE_FORMAT).to_string(),
            total_sales: domain.total_sales,
            expenses: domain.expenses.into_iter().map(Self::category_to_dto).collect(),
        }
    }

    pub fn to_dto_list(domain_records: Vec<DomainRecord>) -> Vec<SharedRecord> {
        domain_records.into_iter().map(Self::to_dto).collect()
    }

    fn category_to_domain(dto: SharedCategory) -> DomainCategory {
        DomainCategory {
            id: dto.id,
            name: dto.name,
            items: dto
                .items
                .into_iter()
                .map(|item| DomainItem {
                    id: item.id,
                    name: item.name,
                    amount: item.amount,
                    bill_photo: item.bill_photo,
                })
                .collect(),
        }
    }

    fn category_to_dto(domain: DomainCategory) -> SharedCategory {
        SharedCategory {
            id: domain.id,
            name: domain.name,
            items: domain
                .items
                .into_iter()
                .map(|item| SharedItem {
                    id: item.id,
                    name: item.name,
                    amount: item.amount,
                    bill_photo: item.bill_photo,
                })
                .collect(),
        }
    }
}
