use crate::domain::model::LookupKind;
use crate::domain::ports::NameLookup;
use crate::utils::error::LookupError;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// 三個外部查詢服務的 base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEndpoints {
    pub age_base_url: String,
    pub gender_base_url: String,
    pub nation_base_url: String,
}

impl LookupEndpoints {
    fn base_url(&self, kind: LookupKind) -> &str {
        match kind {
            LookupKind::Age => &self.age_base_url,
            LookupKind::Gender => &self.gender_base_url,
            LookupKind::Nationality => &self.nation_base_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AgeResponse {
    #[serde(default)]
    age: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenderResponse {
    #[serde(default)]
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountryProbability {
    country_id: String,
}

#[derive(Debug, Deserialize)]
struct NationResponse {
    country: Vec<CountryProbability>,
}

#[derive(Debug, Clone)]
pub struct HttpLookupClient {
    endpoints: LookupEndpoints,
    client: Client,
}

impl HttpLookupClient {
    pub fn new(endpoints: LookupEndpoints) -> Self {
        Self {
            endpoints,
            client: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<T, LookupError> {
        let url = format!("{}/", self.endpoints.base_url(kind).trim_end_matches('/'));

        tracing::debug!("Making {} lookup request to: {} (name={})", kind, url, name);
        let response = self
            .client
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await
            .map_err(|source| LookupError::Transport { kind, source })?;

        let status = response.status();
        tracing::debug!("{} lookup response status: {}", kind, status);
        if !status.is_success() {
            return Err(LookupError::Status {
                kind,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| LookupError::Transport { kind, source })?;

        serde_json::from_slice(&body).map_err(|e| LookupError::Decode {
            kind,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl NameLookup for HttpLookupClient {
    async fn age(&self, name: &str) -> Result<u32, LookupError> {
        let response: AgeResponse = self.fetch(LookupKind::Age, name).await?;
        Ok(response.age.unwrap_or_default())
    }

    async fn gender(&self, name: &str) -> Result<String, LookupError> {
        let response: GenderResponse = self.fetch(LookupKind::Gender, name).await?;
        Ok(response.gender.unwrap_or_default())
    }

    async fn nationality(&self, name: &str) -> Result<String, LookupError> {
        let response: NationResponse = self.fetch(LookupKind::Nationality, name).await?;
        response
            .country
            .into_iter()
            .next()
            .map(|c| c.country_id)
            .ok_or(LookupError::EmptyResult {
                kind: LookupKind::Nationality,
            })
    }
}
