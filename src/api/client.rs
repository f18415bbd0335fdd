use crate::api::traits::PropertyApi;
use crate::api::types::{ApiResponse, ContactRequest, FilterQuery, PropertyRecord};
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Listings backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpPropertyApi {
    client: Client,
    base_url: Url,
}

impl HttpPropertyApi {
    /// Create a client pointed at the default local backend
    pub fn new() -> Result<Self> {
        Self::with_config(&ApiConfig::default())
    }

    /// Create a client from explicit settings
    pub fn with_config(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Build the filter request without sending it
    pub fn filter_request(&self, query: &FilterQuery) -> Result<reqwest::Request> {
        Ok(self
            .client
            .get(self.endpoint("propiedades/filtrar")?)
            .query(query)
            .build()?)
    }

    /// Fail on non-success statuses, then unwrap the response envelope
    async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend returned status {}: {}", status, body);
            return Err(ApiError::Status {
                status,
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        Ok(response.json::<ApiResponse<T>>().await?)
    }
}

impl Default for HttpPropertyApi {
    fn default() -> Self {
        Self::new().expect("Failed to create default HttpPropertyApi")
    }
}

#[async_trait]
impl PropertyApi for HttpPropertyApi {
    async fn fetch_all_properties(&self) -> Result<Vec<PropertyRecord>> {
        let url = self.endpoint("propiedades")?;
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;
        let envelope = Self::read_envelope::<Vec<PropertyRecord>>(response).await?;

        match envelope.data {
            Some(records) => {
                info!("Fetched {} properties", records.len());
                Ok(records)
            }
            None => Err(ApiError::NotFound("No properties found".to_string())),
        }
    }

    async fn fetch_filtered_properties(&self, query: &FilterQuery) -> Result<Vec<PropertyRecord>> {
        let request = self.filter_request(query)?;
        debug!("Fetching URL: {}", request.url());

        let response = self.client.execute(request).await?;
        let envelope = Self::read_envelope::<Vec<PropertyRecord>>(response).await?;

        // The backend answers an empty match with `data: null`.
        let records = envelope.data.unwrap_or_default();
        debug!("Filter returned {} properties", records.len());
        Ok(records)
    }

    async fn fetch_property(&self, id: i64) -> Result<PropertyRecord> {
        let url = self.endpoint(&format!("propiedades/{id}"))?;
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;
        Self::read_envelope::<PropertyRecord>(response)
            .await?
            .data
            .ok_or_else(|| ApiError::NotFound(format!("Property {id} not found")))
    }

    async fn submit_contact_request(&self, request: &ContactRequest) -> Result<()> {
        let url = self.endpoint("consulta")?;
        debug!("Posting contact request for property {}", request.property_id);

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Contact request rejected with status {}", status);
            return Err(ApiError::Status {
                status,
                message: "Failed to send contact request".to_string(),
            });
        }

        info!("Contact request sent for property {}", request.property_id);
        Ok(())
    }
}
