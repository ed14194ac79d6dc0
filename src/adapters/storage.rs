use crate::domain::model::{Person, PersonFilter};
use crate::domain::ports::PersonStore;
use crate::utils::error::{AppError, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<u64, Person>,
    next_id: u64,
}

/// 以記憶體保存的 person 表，id 從 1 開始遞增
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonStore for InMemoryPersonStore {
    async fn create(&self, mut person: Person) -> Result<Person> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        person.id = table.next_id;
        table.rows.insert(person.id, person.clone());
        Ok(person)
    }

    async fn get_by_id(&self, id: u64) -> Result<Person> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(AppError::NotFound { id })
    }

    async fn get_all(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
        let table = self.table.read().await;
        let persons = table
            .rows
            .values()
            .filter(|p| p.is_active && filter.matches(p))
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect();
        Ok(persons)
    }

    async fn update(&self, person: Person) -> Result<Person> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&person.id) {
            Some(row) => {
                *row = person.clone();
                Ok(person)
            }
            None => Err(AppError::NotFound { id: person.id }),
        }
    }

    async fn soft_delete(&self, id: u64) -> Result<()> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(AppError::NotFound { id })?;
        let now = Utc::now();
        row.is_active = false;
        row.deleted_at = Some(now);
        row.updated_at = now;
        Ok(())
    }
}
