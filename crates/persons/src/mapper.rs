//! Conversions between transfer payloads and person entities.
//!
//! Each direction is a single exhaustive `match` over the closed variant set, so
//! exactly one arm handles any given value and the output variant always equals
//! the input variant.

use crate::dto::{AddressDto, ChildDto, EmployeeDto, PersonDto, PersonPayload};
use crate::person::{Address, Person, PersonVariant};

/// Conversion boundary between the transfer and entity representations.
pub trait PersonMapper: Send + Sync {
    fn to_entity(&self, payload: PersonPayload) -> Person;
    fn to_payload(&self, person: &Person) -> PersonPayload;
    fn to_address(&self, address: AddressDto) -> Address;
}

/// Default mapper backed by the `From` conversions in this module.
#[derive(Debug, Default, Copy, Clone)]
pub struct VariantMapper;

impl PersonMapper for VariantMapper {
    fn to_entity(&self, payload: PersonPayload) -> Person {
        Person::from(payload)
    }

    fn to_payload(&self, person: &Person) -> PersonPayload {
        PersonPayload::from(person)
    }

    fn to_address(&self, address: AddressDto) -> Address {
        Address::from(address)
    }
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Address {
            city: dto.city,
            street: dto.street,
            building: dto.building,
        }
    }
}

impl From<&Address> for AddressDto {
    fn from(address: &Address) -> Self {
        AddressDto {
            city: address.city.clone(),
            street: address.street.clone(),
            building: address.building,
        }
    }
}

impl From<PersonPayload> for Person {
    fn from(payload: PersonPayload) -> Self {
        let (person, variant) = match payload {
            PersonPayload::Person(p) => (p, PersonVariant::Base),
            PersonPayload::Child(c) => (
                c.person,
                PersonVariant::Child {
                    kindergarten: c.kindergarten,
                },
            ),
            PersonPayload::Employee(e) => (
                e.person,
                PersonVariant::Employee {
                    company: e.company,
                    salary: e.salary,
                },
            ),
        };

        Person::with_variant(
            person.id,
            person.name,
            person.birth_date,
            person.address.into(),
            variant,
        )
    }
}

impl From<&Person> for PersonPayload {
    fn from(entity: &Person) -> Self {
        let person = PersonDto {
            id: entity.id_typed(),
            name: entity.name().to_string(),
            birth_date: entity.birth_date(),
            address: AddressDto::from(entity.address()),
        };

        match entity.variant() {
            PersonVariant::Base => PersonPayload::Person(person),
            PersonVariant::Child { kindergarten } => PersonPayload::Child(ChildDto {
                person,
                kindergarten: kindergarten.clone(),
            }),
            PersonVariant::Employee { company, salary } => PersonPayload::Employee(EmployeeDto {
                person,
                company: company.clone(),
                salary: *salary,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::PersonKind;
    use census_core::PersonId;
    use chrono::NaiveDate;

    fn base_dto(id: i32) -> PersonDto {
        PersonDto {
            id: PersonId::new(id),
            name: "Sarah".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 11, 23).unwrap(),
            address: AddressDto {
                city: "Rehovot".to_string(),
                street: "Herzl".to_string(),
                building: 7,
            },
        }
    }

    #[test]
    fn employee_payload_resolves_to_employee_entity() {
        let payload = PersonPayload::Employee(EmployeeDto {
            person: base_dto(3000),
            company: "Motorola".to_string(),
            salary: 20000.0,
        });

        let entity = VariantMapper.to_entity(payload);

        assert_eq!(entity.kind(), PersonKind::Employee);
        assert_eq!(
            entity.variant(),
            &PersonVariant::Employee {
                company: "Motorola".to_string(),
                salary: 20000.0,
            }
        );
        assert_eq!(entity.address().city, "Rehovot");
    }

    #[test]
    fn base_payload_never_gains_variant_fields() {
        let entity = VariantMapper.to_entity(PersonPayload::Person(base_dto(1000)));
        assert_eq!(entity.variant(), &PersonVariant::Base);

        let back = VariantMapper.to_payload(&entity);
        assert_eq!(back, PersonPayload::Person(base_dto(1000)));
    }

    #[test]
    fn child_entity_resolves_to_child_payload() {
        let entity = Person::child(
            PersonId::new(2000),
            "Mosche",
            NaiveDate::from_ymd_opt(2018, 7, 5).unwrap(),
            Address::new("Ashkelon", "Bar Kihva", 21),
            "Shalom",
        );

        match VariantMapper.to_payload(&entity) {
            PersonPayload::Child(c) => {
                assert_eq!(c.kindergarten, "Shalom");
                assert_eq!(c.person.name, "Mosche");
            }
            other => panic!("Expected Child payload, got {other:?}"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn payload_strategy() -> impl Strategy<Value = PersonPayload> {
            let base = (
                any::<i32>(),
                "[A-Za-z][A-Za-z ]{0,30}",
                (1900i32..2100, 1u32..=12, 1u32..=28),
                ("[A-Za-z ]{1,20}", "[A-Za-z ]{1,20}", 1i32..500),
            )
                .prop_map(|(id, name, (y, m, d), (city, street, building))| PersonDto {
                    id: PersonId::new(id),
                    name,
                    birth_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                    address: AddressDto {
                        city,
                        street,
                        building,
                    },
                });

            prop_oneof![
                base.clone().prop_map(PersonPayload::Person),
                (base.clone(), "[A-Za-z ]{1,20}").prop_map(|(person, kindergarten)| {
                    PersonPayload::Child(ChildDto {
                        person,
                        kindergarten,
                    })
                }),
                (base, "[A-Za-z ]{1,20}", 0.0f64..1_000_000.0).prop_map(
                    |(person, company, salary)| {
                        PersonPayload::Employee(EmployeeDto {
                            person,
                            company,
                            salary,
                        })
                    }
                ),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: payload -> entity -> payload is lossless and keeps the variant.
            #[test]
            fn resolution_preserves_variant_and_fields(payload in payload_strategy()) {
                let entity = VariantMapper.to_entity(payload.clone());
                prop_assert_eq!(entity.kind(), payload.kind());
                prop_assert_eq!(entity.id_typed(), payload.id());

                let back = VariantMapper.to_payload(&entity);
                prop_assert_eq!(back, payload);
            }
        }
    }
}
