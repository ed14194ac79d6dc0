use crate::domain::model::{Person, PersonFilter};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;

/// 以名字推測屬性的外部服務
#[async_trait]
pub trait NameLookup: Send + Sync {
    async fn age(&self, name: &str) -> std::result::Result<u32, LookupError>;
    async fn gender(&self, name: &str) -> std::result::Result<String, LookupError>;
    async fn nationality(&self, name: &str) -> std::result::Result<String, LookupError>;
}

pub trait PersonStore: Send + Sync {
    fn create(&self, person: Person) -> impl std::future::Future<Output = Result<Person>> + Send;
    fn get_by_id(&self, id: u64) -> impl std::future::Future<Output = Result<Person>> + Send;
    fn get_all(
        &self,
        filter: &PersonFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Person>>> + Send;
    fn update(&self, person: Person) -> impl std::future::Future<Output = Result<Person>> + Send;
    fn soft_delete(&self, id: u64) -> impl std::future::Future<Output = Result<()>> + Send;
}
