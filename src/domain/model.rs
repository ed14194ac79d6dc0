use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    Age,
    Gender,
    Nationality,
}

impl LookupKind {
    pub const ALL: [LookupKind; 3] = [LookupKind::Age, LookupKind::Gender, LookupKind::Nationality];
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupKind::Age => "age",
            LookupKind::Gender => "gender",
            LookupKind::Nationality => "nationality",
        };
        f.write_str(name)
    }
}

/// 單一查詢的結果，以 variant 標記來源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupValue {
    Age(u32),
    Gender(String),
    Nationality(String),
}

impl LookupValue {
    pub fn kind(&self) -> LookupKind {
        match self {
            LookupValue::Age(_) => LookupKind::Age,
            LookupValue::Gender(_) => LookupKind::Gender,
            LookupValue::Nationality(_) => LookupKind::Nationality,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentOutcome {
    pub age: u32,
    pub gender: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub age: u32,
    pub gender: String,
    pub nationality: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Person {
    /// 由請求與查詢結果組成新紀錄，id 由 store 指定
    pub fn new_enriched(request: CreatePersonRequest, outcome: EnrichmentOutcome) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: request.name,
            surname: request.surname,
            patronymic: request.patronymic.unwrap_or_default(),
            age: outcome.age,
            gender: outcome.gender,
            nationality: outcome.nationality,
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn apply(&mut self, update: UpdatePersonRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(surname) = update.surname {
            self.surname = surname;
        }
        if let Some(patronymic) = update.patronymic {
            self.patronymic = patronymic;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(nationality) = update.nationality {
            self.nationality = nationality;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePersonRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub patronymic: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
}

pub const DEFAULT_PAGE_LIMIT: usize = 10;

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonFilter {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub gender: Option<String>,
    #[serde(alias = "nation")]
    pub nationality: Option<String>,
}

impl Default for PersonFilter {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            name: None,
            surname: None,
            patronymic: None,
            min_age: None,
            max_age: None,
            gender: None,
            nationality: None,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &Option<String>) -> bool {
    match needle.as_deref() {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

impl PersonFilter {
    /// 只比對欄位條件，分頁與 is_active 由 store 處理
    pub fn matches(&self, person: &Person) -> bool {
        contains_ignore_case(&person.name, &self.name)
            && contains_ignore_case(&person.surname, &self.surname)
            && contains_ignore_case(&person.patronymic, &self.patronymic)
            && contains_ignore_case(&person.gender, &self.gender)
            && contains_ignore_case(&person.nationality, &self.nationality)
            && self.min_age.map_or(true, |min| person.age >= min)
            && self.max_age.map_or(true, |max| person.age <= max)
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// 未知的 age / gender / nationality 與空的 patronymic 不輸出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: u64,
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub patronymic: String,
    #[serde(skip_serializing_if = "is_zero", default)]
    pub age: u32,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub gender: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub nationality: String,
    pub is_active: bool,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            surname: person.surname,
            patronymic: person.patronymic,
            age: person.age,
            gender: person.gender,
            nationality: person.nationality,
            is_active: person.is_active,
        }
    }
}
