//! Sample records for an empty registry.

use chrono::NaiveDate;

use census_core::PersonId;
use census_persons::{Address, Person};

use crate::store::{PersonStore, StoreError};

/// One record of each variant.
pub fn sample_persons() -> Vec<Person> {
    vec![
        Person::new(
            PersonId::new(1000),
            "John",
            ymd(1995, 4, 11),
            Address::new("Tel Aviv", "Ben Gvirol", 87),
        ),
        Person::child(
            PersonId::new(2000),
            "Mosche",
            ymd(2018, 7, 5),
            Address::new("Ashkelon", "Bar Kihva", 21),
            "Shalom",
        ),
        Person::employee(
            PersonId::new(3000),
            "Sarah",
            ymd(1995, 11, 23),
            Address::new("Rehovot", "Herzl", 7),
            "Motorola",
            20000.0,
        ),
    ]
}

/// Save the sample records when the store holds none. Returns how many were saved.
pub fn seed_if_empty<S>(store: &S) -> Result<usize, StoreError>
where
    S: PersonStore + ?Sized,
{
    let existing = store.count()?;
    if existing > 0 {
        tracing::debug!(existing, "store not empty; skipping seed");
        return Ok(0);
    }

    let persons = sample_persons();
    let seeded = persons.len();
    for person in persons {
        store.save(person)?;
    }

    tracing::info!(seeded, "seeded sample persons");
    Ok(seeded)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Fixture dates are literals known to be valid.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
