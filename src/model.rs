//! Record and sort types shared by the store, the pipeline and the UI.
//!
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Gender choice offered by the add-user form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// One row of the user table.
///
/// Serialized field order is the column order of the export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub age: u32,
    pub city: String,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A validated form submission that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub age: u32,
    pub city: String,
}

impl NewUser {
    pub fn into_record(self, id: u32) -> UserRecord {
        UserRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            age: self.age,
            city: self.city,
        }
    }
}

/// Field a table can be sorted by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    FirstName,
    LastName,
    Email,
    Gender,
    Age,
    City,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Id,
        SortKey::FirstName,
        SortKey::LastName,
        SortKey::Email,
        SortKey::Gender,
        SortKey::Age,
        SortKey::City,
    ];

    /// Field name as it appears in seed JSON and in the export header.
    pub fn field_name(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::FirstName => "firstName",
            SortKey::LastName => "lastName",
            SortKey::Email => "email",
            SortKey::Gender => "gender",
            SortKey::Age => "age",
            SortKey::City => "city",
        }
    }

    /// Natural ordering of two records on this field.
    pub fn compare(self, a: &UserRecord, b: &UserRecord) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::FirstName => a.first_name.cmp(&b.first_name),
            SortKey::LastName => a.last_name.cmp(&b.last_name),
            SortKey::Email => a.email.cmp(&b.email),
            SortKey::Gender => a.gender.as_str().cmp(b.gender.as_str()),
            SortKey::Age => a.age.cmp(&b.age),
            SortKey::City => a.city.cmp(&b.city),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u32, first: &str, gender: Gender, age: u32) -> UserRecord {
        UserRecord {
            id,
            first_name: first.to_string(),
            last_name: "X".to_string(),
            email: format!("{first}@example.com"),
            gender,
            age,
            city: "Rome".to_string(),
        }
    }

    #[test]
    fn record_serializes_with_camel_case_fields_in_order() {
        let json = serde_json::to_string(&rec(1, "Ann", Gender::Female, 30)).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"firstName":"Ann","lastName":"X","email":"Ann@example.com","gender":"female","age":30,"city":"Rome"}"#
        );
    }

    #[test]
    fn gender_compares_as_text() {
        let a = rec(1, "A", Gender::Female, 1);
        let b = rec(2, "B", Gender::Male, 1);
        assert_eq!(SortKey::Gender.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn age_compares_numerically() {
        let a = rec(1, "A", Gender::Male, 9);
        let b = rec(2, "B", Gender::Male, 10);
        assert_eq!(SortKey::Age.compare(&a, &b), Ordering::Less);
    }
}
