use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use census_core::PersonId;
use census_persons::{CityPopulationDto, Person};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Backend-specific failure (connectivity, constraint violation, ...).
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Keyed record store for person entities.
///
/// Implementations decide durability; the service layer only relies on these
/// operations. Query results are returned in a stable order.
pub trait PersonStore: Send + Sync {
    fn exists_by_id(&self, id: PersonId) -> Result<bool, StoreError>;

    fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StoreError>;

    /// Insert or overwrite the record keyed by the person's id.
    fn save(&self, person: Person) -> Result<(), StoreError>;

    fn delete(&self, person: &Person) -> Result<(), StoreError>;

    fn query_by_city(&self, city: &str) -> Result<Vec<Person>, StoreError>;

    fn query_by_name(&self, name: &str) -> Result<Vec<Person>, StoreError>;

    /// Persons born within `[from, to]` (inclusive).
    fn query_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Person>, StoreError>;

    fn aggregate_population_by_city(&self) -> Result<Vec<CityPopulationDto>, StoreError>;

    fn count(&self) -> Result<u64, StoreError>;
}

impl<S> PersonStore for Arc<S>
where
    S: PersonStore + ?Sized,
{
    fn exists_by_id(&self, id: PersonId) -> Result<bool, StoreError> {
        (**self).exists_by_id(id)
    }

    fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StoreError> {
        (**self).find_by_id(id)
    }

    fn save(&self, person: Person) -> Result<(), StoreError> {
        (**self).save(person)
    }

    fn delete(&self, person: &Person) -> Result<(), StoreError> {
        (**self).delete(person)
    }

    fn query_by_city(&self, city: &str) -> Result<Vec<Person>, StoreError> {
        (**self).query_by_city(city)
    }

    fn query_by_name(&self, name: &str) -> Result<Vec<Person>, StoreError> {
        (**self).query_by_name(name)
    }

    fn query_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Person>, StoreError> {
        (**self).query_by_birth_date_range(from, to)
    }

    fn aggregate_population_by_city(&self) -> Result<Vec<CityPopulationDto>, StoreError> {
        (**self).aggregate_population_by_city()
    }

    fn count(&self) -> Result<u64, StoreError> {
        (**self).count()
    }
}
