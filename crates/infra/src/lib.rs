//! Infrastructure layer: storage, orchestration, seeding, configuration.

pub mod config;
pub mod locks;
pub mod person_service;
pub mod seed;
pub mod store;


pub use config::CensusConfig;
pub use person_service::{PersonService, PersonServiceImpl, ServiceError};
pub use store::{InMemoryPersonStore, PersonStore, StoreError};
