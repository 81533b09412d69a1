//! Persons domain module (persons, children and employees).
//!
//! This crate contains the person variant family, its transfer representation
//! and the mapping between the two, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod age;
pub mod dto;
pub mod mapper;
pub mod person;

pub use age::BirthDateWindow;
pub use dto::{AddressDto, ChildDto, CityPopulationDto, EmployeeDto, PersonDto, PersonPayload};
pub use mapper::{PersonMapper, VariantMapper};
pub use person::{Address, Person, PersonKind, PersonVariant};
