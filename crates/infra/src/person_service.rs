//! Person registry service (application-level orchestration).
//!
//! Every operation follows the same shape:
//!
//! ```text
//! payload / id
//!   ↓
//! 1. Lock the id's stripe (mutations only)
//!   ↓
//! 2. Load or check the record in the store (fail fast with NotFound)
//!   ↓
//! 3. Mutate the entity / resolve the payload through the mapper
//!   ↓
//! 4. Write back and map the result to its transfer variant
//! ```
//!
//! Read-only queries skip step 1.

use std::sync::Arc;

use thiserror::Error;

use census_core::{Clock, DomainError, PersonId, SystemClock};
use census_persons::{
    AddressDto, BirthDateWindow, CityPopulationDto, Person, PersonMapper, PersonPayload,
    VariantMapper,
};

use crate::locks::KeyLocks;
use crate::store::{PersonStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No present record with this id.
    #[error("person {0} not found")]
    NotFound(PersonId),
    /// Domain validation failure (deterministic).
    #[error("validation failed: {0}")]
    Validation(String),
    /// Store fault, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::InvalidId(msg) => ServiceError::Validation(msg),
        }
    }
}

/// Public contract of the person registry.
pub trait PersonService: Send + Sync {
    /// Returns `false` (and changes nothing) when the id is already taken.
    fn add_person(&self, payload: PersonPayload) -> Result<bool, ServiceError>;

    fn find_person_by_id(&self, id: PersonId) -> Result<PersonPayload, ServiceError>;

    /// Deletes the record and returns its last snapshot.
    fn remove_person(&self, id: PersonId) -> Result<PersonPayload, ServiceError>;

    fn update_person_name(&self, id: PersonId, name: &str) -> Result<PersonPayload, ServiceError>;

    fn update_person_address(
        &self,
        id: PersonId,
        address: AddressDto,
    ) -> Result<PersonPayload, ServiceError>;

    fn find_persons_by_city(&self, city: &str) -> Result<Vec<PersonPayload>, ServiceError>;

    fn find_persons_by_name(&self, name: &str) -> Result<Vec<PersonPayload>, ServiceError>;

    /// Persons whose age today lies in `min_age..=max_age`.
    fn find_persons_between_ages(
        &self,
        min_age: u32,
        max_age: u32,
    ) -> Result<Vec<PersonPayload>, ServiceError>;

    fn get_cities_population(&self) -> Result<Vec<CityPopulationDto>, ServiceError>;
}

pub struct PersonServiceImpl<S, M = VariantMapper> {
    store: S,
    mapper: M,
    locks: KeyLocks,
    clock: Arc<dyn Clock>,
}

impl<S> PersonServiceImpl<S, VariantMapper>
where
    S: PersonStore,
{
    pub fn new(store: S) -> Self {
        Self::with_mapper(store, VariantMapper)
    }
}

impl<S, M> PersonServiceImpl<S, M>
where
    S: PersonStore,
    M: PersonMapper,
{
    pub fn with_mapper(store: S, mapper: M) -> Self {
        Self {
            store,
            mapper,
            locks: KeyLocks::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used by age-based queries.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self, id: PersonId) -> Result<Person, ServiceError> {
        self.store.find_by_id(id)?.ok_or_else(|| {
            tracing::debug!(person_id = %id, "person not found");
            ServiceError::NotFound(id)
        })
    }

    /// Load, mutate and write back one record while holding its stripe.
    fn modify<F>(&self, id: PersonId, change: F) -> Result<PersonPayload, ServiceError>
    where
        F: FnOnce(&mut Person),
    {
        let _guard = self.locks.lock(id);
        let mut person = self.load(id)?;
        change(&mut person);
        self.store.save(person.clone())?;
        Ok(self.mapper.to_payload(&person))
    }

    fn to_payloads(&self, persons: Vec<Person>) -> Vec<PersonPayload> {
        persons.iter().map(|p| self.mapper.to_payload(p)).collect()
    }
}

impl<S, M> PersonService for PersonServiceImpl<S, M>
where
    S: PersonStore,
    M: PersonMapper,
{
    fn add_person(&self, payload: PersonPayload) -> Result<bool, ServiceError> {
        let id = payload.id();
        let _guard = self.locks.lock(id);

        if self.store.exists_by_id(id)? {
            tracing::warn!(person_id = %id, "person already exists; add rejected");
            return Ok(false);
        }

        let person = self.mapper.to_entity(payload);
        let kind = person.kind();
        self.store.save(person)?;

        tracing::info!(person_id = %id, kind = %kind, "person added");
        Ok(true)
    }

    fn find_person_by_id(&self, id: PersonId) -> Result<PersonPayload, ServiceError> {
        let person = self.load(id)?;
        Ok(self.mapper.to_payload(&person))
    }

    fn remove_person(&self, id: PersonId) -> Result<PersonPayload, ServiceError> {
        let _guard = self.locks.lock(id);
        let person = self.load(id)?;
        self.store.delete(&person)?;

        tracing::info!(person_id = %id, kind = %person.kind(), "person removed");
        Ok(self.mapper.to_payload(&person))
    }

    fn update_person_name(&self, id: PersonId, name: &str) -> Result<PersonPayload, ServiceError> {
        let updated = self.modify(id, |person| person.rename(name))?;
        tracing::info!(person_id = %id, kind = %updated.kind(), "person renamed");
        Ok(updated)
    }

    fn update_person_address(
        &self,
        id: PersonId,
        address: AddressDto,
    ) -> Result<PersonPayload, ServiceError> {
        let address = self.mapper.to_address(address);
        let updated = self.modify(id, |person| person.relocate(address))?;
        tracing::info!(person_id = %id, kind = %updated.kind(), "person relocated");
        Ok(updated)
    }

    fn find_persons_by_city(&self, city: &str) -> Result<Vec<PersonPayload>, ServiceError> {
        let persons = self.store.query_by_city(city)?;
        Ok(self.to_payloads(persons))
    }

    fn find_persons_by_name(&self, name: &str) -> Result<Vec<PersonPayload>, ServiceError> {
        let persons = self.store.query_by_name(name)?;
        Ok(self.to_payloads(persons))
    }

    fn find_persons_between_ages(
        &self,
        min_age: u32,
        max_age: u32,
    ) -> Result<Vec<PersonPayload>, ServiceError> {
        let today = self.clock.today();
        let window = BirthDateWindow::for_ages(today, min_age, max_age)?;
        if window.is_empty() {
            tracing::debug!(min_age, max_age, "inverted age range; nothing to match");
            return Ok(Vec::new());
        }

        let persons = self.store.query_by_birth_date_range(window.from, window.to)?;
        Ok(self.to_payloads(persons))
    }

    fn get_cities_population(&self) -> Result<Vec<CityPopulationDto>, ServiceError> {
        Ok(self.store.aggregate_population_by_city()?)
    }
}
