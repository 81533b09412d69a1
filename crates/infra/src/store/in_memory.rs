use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use census_core::PersonId;
use census_persons::{CityPopulationDto, Person};

use super::r#trait::{PersonStore, StoreError};

/// In-memory person store.
///
/// Intended for tests/dev. Records are kept ordered by id, so every query
/// returns persons in ascending id order.
#[derive(Debug, Default)]
pub struct InMemoryPersonStore {
    records: RwLock<BTreeMap<PersonId, Person>>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<PersonId, Person>>, StoreError> {
        self.records.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<PersonId, Person>>, StoreError> {
        self.records.write().map_err(|_| StoreError::LockPoisoned)
    }

    fn filter<F>(&self, predicate: F) -> Result<Vec<Person>, StoreError>
    where
        F: Fn(&Person) -> bool,
    {
        let records = self.read()?;
        Ok(records.values().filter(|p| predicate(p)).cloned().collect())
    }
}

impl PersonStore for InMemoryPersonStore {
    fn exists_by_id(&self, id: PersonId) -> Result<bool, StoreError> {
        Ok(self.read()?.contains_key(&id))
    }

    fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StoreError> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn save(&self, person: Person) -> Result<(), StoreError> {
        self.write()?.insert(person.id_typed(), person);
        Ok(())
    }

    fn delete(&self, person: &Person) -> Result<(), StoreError> {
        self.write()?.remove(&person.id_typed());
        Ok(())
    }

    fn query_by_city(&self, city: &str) -> Result<Vec<Person>, StoreError> {
        self.filter(|p| p.address().city == city)
    }

    fn query_by_name(&self, name: &str) -> Result<Vec<Person>, StoreError> {
        self.filter(|p| p.name() == name)
    }

    fn query_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Person>, StoreError> {
        self.filter(|p| from <= p.birth_date() && p.birth_date() <= to)
    }

    fn aggregate_population_by_city(&self) -> Result<Vec<CityPopulationDto>, StoreError> {
        let records = self.read()?;

        let mut counts: HashMap<&str, u64> = HashMap::new();
        for person in records.values() {
            *counts.entry(person.address().city.as_str()).or_insert(0) += 1;
        }

        let mut population: Vec<CityPopulationDto> = counts
            .into_iter()
            .map(|(city, count)| CityPopulationDto::new(city, count))
            .collect();
        // Most populated first; ties broken by city name for a stable order.
        population.sort_by(|a, b| {
            b.population
                .cmp(&a.population)
                .then_with(|| a.city.cmp(&b.city))
        });

        Ok(population)
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.len() as u64)
    }
}
