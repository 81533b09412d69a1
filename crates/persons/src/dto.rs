//! Transfer representation of persons (the external payload family).
//!
//! On the wire every payload is a JSON object carrying a `"type"` discriminator:
//!
//! ```text
//! { "type": "EmployeeDto", "id": 3000, "name": "Sarah", "birthDate": "1995-11-23",
//!   "address": { "city": "Rehovot", "street": "Herzl", "building": 7 },
//!   "company": "Motorola", "salary": 20000.0 }
//! ```
//!
//! A missing or unrecognized tag reads as the base `PersonDto`.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use census_core::PersonId;

use crate::person::PersonKind;

pub const PERSON_DTO_TAG: &str = "PersonDto";
pub const CHILD_DTO_TAG: &str = "ChildDto";
pub const EMPLOYEE_DTO_TAG: &str = "EmployeeDto";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDto {
    pub city: String,
    pub street: String,
    pub building: i32,
}

/// Fields shared by every person payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub id: PersonId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub address: AddressDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDto {
    #[serde(flatten)]
    pub person: PersonDto,
    pub kindergarten: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
    #[serde(flatten)]
    pub person: PersonDto,
    pub company: String,
    pub salary: f64,
}

/// A person payload of any supported variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PersonPayload {
    #[serde(rename = "PersonDto")]
    Person(PersonDto),
    #[serde(rename = "ChildDto")]
    Child(ChildDto),
    #[serde(rename = "EmployeeDto")]
    Employee(EmployeeDto),
}

impl PersonPayload {
    pub fn kind(&self) -> PersonKind {
        match self {
            PersonPayload::Person(_) => PersonKind::Person,
            PersonPayload::Child(_) => PersonKind::Child,
            PersonPayload::Employee(_) => PersonKind::Employee,
        }
    }

    /// Shared fields, whatever the variant.
    pub fn person(&self) -> &PersonDto {
        match self {
            PersonPayload::Person(p) => p,
            PersonPayload::Child(c) => &c.person,
            PersonPayload::Employee(e) => &e.person,
        }
    }

    pub fn id(&self) -> PersonId {
        self.person().id
    }
}

/// Maps a wire discriminator onto a variant. Anything unknown is the base case.
pub fn kind_from_tag(tag: Option<&str>) -> PersonKind {
    match tag {
        Some(CHILD_DTO_TAG) => PersonKind::Child,
        Some(EMPLOYEE_DTO_TAG) => PersonKind::Employee,
        _ => PersonKind::Person,
    }
}

pub fn tag_for_kind(kind: PersonKind) -> &'static str {
    match kind {
        PersonKind::Person => PERSON_DTO_TAG,
        PersonKind::Child => CHILD_DTO_TAG,
        PersonKind::Employee => EMPLOYEE_DTO_TAG,
    }
}

/// Superset of every variant's fields, read before the tag is resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    #[serde(rename = "type", default)]
    tag: Option<String>,
    id: PersonId,
    name: String,
    birth_date: NaiveDate,
    address: AddressDto,
    #[serde(default)]
    kindergarten: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    salary: Option<f64>,
}

impl<'de> Deserialize<'de> for PersonPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawPayload::deserialize(deserializer)?;
        let person = PersonDto {
            id: raw.id,
            name: raw.name,
            birth_date: raw.birth_date,
            address: raw.address,
        };

        match kind_from_tag(raw.tag.as_deref()) {
            PersonKind::Child => {
                let kindergarten = raw
                    .kindergarten
                    .ok_or_else(|| <D::Error as de::Error>::missing_field("kindergarten"))?;
                Ok(PersonPayload::Child(ChildDto {
                    person,
                    kindergarten,
                }))
            }
            PersonKind::Employee => {
                let company = raw
                    .company
                    .ok_or_else(|| <D::Error as de::Error>::missing_field("company"))?;
                let salary = raw.salary.ok_or_else(|| <D::Error as de::Error>::missing_field("salary"))?;
                Ok(PersonPayload::Employee(EmployeeDto {
                    person,
                    company,
                    salary,
                }))
            }
            PersonKind::Person => Ok(PersonPayload::Person(person)),
        }
    }
}

/// Read-only aggregate: number of persons resident in a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPopulationDto {
    pub city: String,
    pub population: u64,
}

impl CityPopulationDto {
    pub fn new(city: impl Into<String>, population: u64) -> Self {
        Self {
            city: city.into(),
            population,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_json() -> serde_json::Value {
        json!({
            "id": 3000,
            "name": "Sarah",
            "birthDate": "1995-11-23",
            "address": { "city": "Rehovot", "street": "Herzl", "building": 7 }
        })
    }

    fn with(mut value: serde_json::Value, extra: serde_json::Value) -> serde_json::Value {
        let obj = value.as_object_mut().unwrap();
        for (k, v) in extra.as_object().unwrap() {
            obj.insert(k.clone(), v.clone());
        }
        value
    }

    #[test]
    fn employee_tag_selects_employee_variant() {
        let value = with(
            base_json(),
            json!({ "type": "EmployeeDto", "company": "Motorola", "salary": 20000 }),
        );

        let payload: PersonPayload = serde_json::from_value(value).unwrap();
        match payload {
            PersonPayload::Employee(e) => {
                assert_eq!(e.company, "Motorola");
                assert_eq!(e.salary, 20000.0);
                assert_eq!(e.person.id, PersonId::new(3000));
                assert_eq!(e.person.birth_date, NaiveDate::from_ymd_opt(1995, 11, 23).unwrap());
            }
            other => panic!("Expected Employee payload, got {other:?}"),
        }
    }

    #[test]
    fn child_tag_selects_child_variant() {
        let value = with(base_json(), json!({ "type": "ChildDto", "kindergarten": "Shalom" }));

        let payload: PersonPayload = serde_json::from_value(value).unwrap();
        assert_eq!(payload.kind(), PersonKind::Child);
    }

    #[test]
    fn missing_tag_falls_back_to_base_person() {
        let payload: PersonPayload = serde_json::from_value(base_json()).unwrap();
        assert_eq!(payload.kind(), PersonKind::Person);
    }

    #[test]
    fn unknown_tag_falls_back_to_base_person_and_drops_foreign_fields() {
        let value = with(
            base_json(),
            json!({ "type": "Employee", "company": "Motorola", "salary": 20000 }),
        );

        let payload: PersonPayload = serde_json::from_value(value).unwrap();
        assert_eq!(payload.kind(), PersonKind::Person);

        let out = serde_json::to_value(&payload).unwrap();
        assert_eq!(out["type"], "PersonDto");
        assert!(out.get("company").is_none());
        assert!(out.get("salary").is_none());
    }

    #[test]
    fn known_tag_with_missing_variant_field_is_rejected() {
        let value = with(base_json(), json!({ "type": "EmployeeDto", "company": "Motorola" }));

        let err = serde_json::from_value::<PersonPayload>(value).unwrap_err();
        assert!(err.to_string().contains("salary"));
    }

    #[test]
    fn serialization_always_writes_the_tag() {
        let payload = PersonPayload::Child(ChildDto {
            person: PersonDto {
                id: PersonId::new(2000),
                name: "Mosche".to_string(),
                birth_date: NaiveDate::from_ymd_opt(2018, 7, 5).unwrap(),
                address: AddressDto {
                    city: "Ashkelon".to_string(),
                    street: "Bar Kihva".to_string(),
                    building: 21,
                },
            },
            kindergarten: "Shalom".to_string(),
        });

        let out = serde_json::to_value(&payload).unwrap();
        assert_eq!(out["type"], "ChildDto");
        assert_eq!(out["birthDate"], "2018-07-05");
        assert_eq!(out["kindergarten"], "Shalom");
        assert!(out.get("salary").is_none());

        let back: PersonPayload = serde_json::from_value(out).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn tags_and_kinds_agree() {
        for kind in [PersonKind::Person, PersonKind::Child, PersonKind::Employee] {
            assert_eq!(kind_from_tag(Some(tag_for_kind(kind))), kind);
        }
        assert_eq!(kind_from_tag(Some("childdto")), PersonKind::Person);
        assert_eq!(kind_from_tag(None), PersonKind::Person);
    }
}
