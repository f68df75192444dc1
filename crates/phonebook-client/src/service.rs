// # Persons Service
//
// The calls the client makes against the directory server.
//
// ## Implementations
//
// - HTTP: `HttpPersonsService`, talking JSON to `/api/persons`
// - Tests: in-memory doubles implementing the same trait

use async_trait::async_trait;
use phonebook_core::{Entry, EntryId, Error, ErrorBody, NewEntry, Result};
use std::time::Duration;

/// Default timeout for a single request
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Trait for the server calls the controller issues
///
/// Implementations must be usable across async tasks.
#[async_trait]
pub trait PersonsService: Send + Sync {
    /// Fetch the full collection
    async fn get_all(&self) -> Result<Vec<Entry>>;

    /// Create an entry
    async fn create(&self, new_entry: &NewEntry) -> Result<Entry>;

    /// Replace the number of an existing entry
    async fn update(&self, id: EntryId, new_entry: &NewEntry) -> Result<Entry>;

    /// Remove an entry
    async fn remove(&self, id: EntryId) -> Result<()>;
}

/// HTTP implementation of [`PersonsService`]
///
/// # Example
///
/// ```rust,no_run
/// use phonebook_client::{HttpPersonsService, PersonsService};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let service = HttpPersonsService::new("http://localhost:3001");
///     let entries = service.get_all().await?;
///     println!("{} entries", entries.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpPersonsService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPersonsService {
    /// Create a service for the server at `base_url` (e.g., "http://localhost:3001")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a service with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// The server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/persons", self.base_url)
    }

    fn entry_url(&self, id: EntryId) -> String {
        format!("{}/api/persons/{}", self.base_url, id)
    }

    /// Turn a non-success response into `Error::Status`, keeping the server's message
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };
        Err(Error::status(status.as_u16(), message))
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("Request failed: {}", e)))?;
        Self::check(response).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl PersonsService for HttpPersonsService {
    async fn get_all(&self) -> Result<Vec<Entry>> {
        let response = Self::send(self.client.get(self.collection_url())).await?;
        Self::read_json(response).await
    }

    async fn create(&self, new_entry: &NewEntry) -> Result<Entry> {
        let response = Self::send(self.client.post(self.collection_url()).json(new_entry)).await?;
        Self::read_json(response).await
    }

    async fn update(&self, id: EntryId, new_entry: &NewEntry) -> Result<Entry> {
        let response = Self::send(self.client.put(self.entry_url(id)).json(new_entry)).await?;
        Self::read_json(response).await
    }

    async fn remove(&self, id: EntryId) -> Result<()> {
        Self::send(self.client.delete(self.entry_url(id))).await?;
        Ok(())
    }
}
