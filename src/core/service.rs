use crate::core::enrich::Enricher;
use crate::domain::model::{CreatePersonRequest, Person, PersonFilter, UpdatePersonRequest};
use crate::domain::ports::{NameLookup, PersonStore};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub struct PersonService<L: NameLookup + 'static, S: PersonStore> {
    enricher: Enricher<L>,
    store: S,
}

impl<L: NameLookup + 'static, S: PersonStore> PersonService<L, S> {
    pub fn new(enricher: Enricher<L>, store: S) -> Self {
        Self { enricher, store }
    }

    /// 先查詢 age / gender / nationality，全部成功後才寫入
    pub async fn create_person(&self, request: CreatePersonRequest) -> Result<Person> {
        request.validate()?;

        let outcome = self.enricher.enrich(&request.name).await?;
        tracing::debug!(
            "Enriched '{}': age={}, gender={}, nationality={}",
            request.name,
            outcome.age,
            outcome.gender,
            outcome.nationality
        );

        let person = self
            .store
            .create(Person::new_enriched(request, outcome))
            .await?;
        tracing::info!("Created person {} ({} {})", person.id, person.name, person.surname);
        Ok(person)
    }

    pub async fn get_person(&self, id: u64) -> Result<Person> {
        self.store.get_by_id(id).await
    }

    pub async fn list_persons(&self, filter: PersonFilter) -> Result<Vec<Person>> {
        filter.validate()?;
        self.store.get_all(&filter).await
    }

    pub async fn update_person(&self, id: u64, update: UpdatePersonRequest) -> Result<Person> {
        update.validate()?;

        let mut person = self.store.get_by_id(id).await?;
        person.apply(update);
        let person = self.store.update(person).await?;
        tracing::info!("Updated person {}", id);
        Ok(person)
    }

    pub async fn delete_person(&self, id: u64) -> Result<()> {
        self.store.soft_delete(id).await?;
        tracing::info!("Soft-deleted person {}", id);
        Ok(())
    }
}
