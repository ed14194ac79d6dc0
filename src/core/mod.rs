pub mod enrich;
pub mod service;

pub use crate::domain::model::{EnrichmentOutcome, LookupKind, LookupValue, Person, PersonFilter};
pub use crate::domain::ports::{NameLookup, PersonStore};
pub use crate::utils::error::Result;
