use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use census_core::{Entity, PersonId, ValueObject};

/// Discriminator of the closed person variant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonKind {
    Person,
    Child,
    Employee,
}

impl PersonKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PersonKind::Person => "person",
            PersonKind::Child => "child",
            PersonKind::Employee => "employee",
        }
    }
}

impl core::fmt::Display for PersonKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address of a person. Replaced as a whole, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub building: i32,
}

impl Address {
    pub fn new(city: impl Into<String>, street: impl Into<String>, building: i32) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            building,
        }
    }
}

impl ValueObject for Address {}

/// Variant-specific extension of a person record.
///
/// Fixed when the record is created.
#[derive(Debug, Clone, PartialEq)]
pub enum PersonVariant {
    Base,
    Child { kindergarten: String },
    Employee { company: String, salary: f64 },
}

impl PersonVariant {
    pub fn kind(&self) -> PersonKind {
        match self {
            PersonVariant::Base => PersonKind::Person,
            PersonVariant::Child { .. } => PersonKind::Child,
            PersonVariant::Employee { .. } => PersonKind::Employee,
        }
    }
}

/// Entity: a person record (shared fields + variant extension).
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: PersonId,
    name: String,
    birth_date: NaiveDate,
    address: Address,
    variant: PersonVariant,
}

impl Person {
    /// Base person (no variant-specific fields).
    pub fn new(id: PersonId, name: impl Into<String>, birth_date: NaiveDate, address: Address) -> Self {
        Self::with_variant(id, name, birth_date, address, PersonVariant::Base)
    }

    pub fn child(
        id: PersonId,
        name: impl Into<String>,
        birth_date: NaiveDate,
        address: Address,
        kindergarten: impl Into<String>,
    ) -> Self {
        Self::with_variant(
            id,
            name,
            birth_date,
            address,
            PersonVariant::Child {
                kindergarten: kindergarten.into(),
            },
        )
    }

    pub fn employee(
        id: PersonId,
        name: impl Into<String>,
        birth_date: NaiveDate,
        address: Address,
        company: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self::with_variant(
            id,
            name,
            birth_date,
            address,
            PersonVariant::Employee {
                company: company.into(),
                salary,
            },
        )
    }

    pub fn with_variant(
        id: PersonId,
        name: impl Into<String>,
        birth_date: NaiveDate,
        address: Address,
        variant: PersonVariant,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            birth_date,
            address,
            variant,
        }
    }

    pub fn id_typed(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn variant(&self) -> &PersonVariant {
        &self.variant
    }

    pub fn kind(&self) -> PersonKind {
        self.variant.kind()
    }

    /// Replace the name. Identity and variant are untouched.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the whole address. Identity and variant are untouched.
    pub fn relocate(&mut self, address: Address) {
        self.address = address;
    }
}

impl Entity for Person {
    type Id = PersonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
