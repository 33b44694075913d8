//! HTTP client for the remote pet-store inventory service.
//!
//! This module provides the async client used by every inventory command.
//! Read operations (`find_by_status`, `get_by_id`) run inside a bounded
//! retry loop; write operations are issued exactly once and surface the
//! service's verdict directly.
//!
//! # Example
//!
//! ```rust,no_run
//! use blesspets::config::ApiConfig;
//! use blesspets::petstore::client::PetstoreClient;
//! use blesspets::petstore::types::PetStatus;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PetstoreClient::new(&ApiConfig::default())?;
//!     let available = client.find_by_status(PetStatus::Available).await?;
//!     println!("{} pets available", available.len());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::error::{BlesspetsError, Result};
use crate::petstore::reconcile;
use crate::petstore::retry::RetryPolicy;
use crate::petstore::types::{Pet, PetStatus};

/// Status listings get one retry with a fixed pause.
fn default_list_policy() -> RetryPolicy {
    RetryPolicy::fixed(2, Duration::from_millis(1000))
}

/// Single-record reads back off exponentially, capped at 5 seconds.
fn default_get_policy() -> RetryPolicy {
    RetryPolicy::exponential(3, Duration::from_millis(1000), Duration::from_millis(5000))
}

/// Async client for the pet-store inventory API.
///
/// Holds no state besides the transport and the configured endpoint; every
/// record it returns came from a service round-trip.
pub struct PetstoreClient {
    client: Client,
    base_url: String,
    list_policy: RetryPolicy,
    get_policy: RetryPolicy,
}

impl PetstoreClient {
    /// Creates a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            list_policy: default_list_policy(),
            get_policy: default_get_policy(),
        })
    }

    /// Replaces the read retry policies.
    ///
    /// The defaults match production behavior; tests inject policies with
    /// millisecond delays to keep retry scenarios fast.
    #[must_use]
    pub fn with_policies(mut self, list_policy: RetryPolicy, get_policy: RetryPolicy) -> Self {
        self.list_policy = list_policy;
        self.get_policy = get_policy;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches all pets with the given status, in service order.
    ///
    /// Retries on any non-success status or transport failure until the list
    /// policy is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::FetchExhausted`] wrapping the error from the
    /// final attempt.
    pub async fn find_by_status(&self, status: PetStatus) -> Result<Vec<Pet>> {
        let policy = self.list_policy;
        let mut attempt: u32 = 1;

        loop {
            debug!(%status, attempt, max_attempts = policy.max_attempts, "fetching pets by status");

            match self.find_by_status_once(status).await {
                Ok(pets) => {
                    info!(%status, count = pets.len(), attempt, "fetched pets");
                    return Ok(pets);
                }
                Err(err) => {
                    warn!(%status, attempt, error = %err, "fetch attempt failed");
                    if attempt >= policy.max_attempts {
                        error!(%status, "all attempts to fetch pets failed");
                        return Err(BlesspetsError::FetchExhausted {
                            attempts: policy.max_attempts,
                            source: Box::new(err),
                        });
                    }
                    let delay = policy.delay_after(attempt);
                    debug!(delay_ms = delay.as_millis() as u64, "waiting before retry");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn find_by_status_once(&self, status: PetStatus) -> Result<Vec<Pet>> {
        let response = self
            .client
            .get(self.url("/pet/findByStatus"))
            .query(&[("status", status.as_str())])
            .send()
            .await?;

        let code = response.status();
        if !code.is_success() {
            return Err(BlesspetsError::UnexpectedStatus {
                status: code.as_u16(),
            });
        }

        Ok(response.json::<Vec<Pet>>().await?)
    }

    /// Fetches a single pet by id.
    ///
    /// A 404 is classified as [`BlesspetsError::NotFound`] but goes back
    /// through the retry loop like any other failure; callers distinguish
    /// not-found by inspecting the source of the final error. A successful
    /// response whose payload lacks an id fails with
    /// [`BlesspetsError::MalformedPayload`] without further attempts.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::FetchExhausted`] wrapping the error from the
    /// final attempt, or [`BlesspetsError::MalformedPayload`].
    pub async fn get_by_id(&self, id: i64) -> Result<Pet> {
        let policy = self.get_policy;
        let mut attempt: u32 = 1;

        let pet = loop {
            debug!(id, attempt, max_attempts = policy.max_attempts, "fetching pet");

            match self.get_by_id_once(id).await {
                Ok(pet) => {
                    info!(id, attempt, "fetched pet");
                    break pet;
                }
                Err(err) => {
                    warn!(id, attempt, error = %err, "fetch attempt failed");
                    if attempt >= policy.max_attempts {
                        error!(id, "all attempts to fetch pet failed");
                        return Err(BlesspetsError::FetchExhausted {
                            attempts: policy.max_attempts,
                            source: Box::new(err),
                        });
                    }
                    let delay = policy.delay_after(attempt);
                    debug!(delay_ms = delay.as_millis() as u64, "waiting before retry");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        };

        // The identifier check runs once, after the transport loop; a record
        // that decodes without an id is terminal, not retryable.
        if pet.id.is_none() {
            return Err(BlesspetsError::MalformedPayload(
                "pet id missing from response".to_string(),
            ));
        }

        Ok(pet)
    }

    async fn get_by_id_once(&self, id: i64) -> Result<Pet> {
        let response = self.client.get(self.url(&format!("/pet/{id}"))).send().await?;

        match response.status() {
            code if code.is_success() => Ok(response.json::<Pet>().await?),
            StatusCode::NOT_FOUND => Err(BlesspetsError::NotFound { id }),
            code => Err(BlesspetsError::UnexpectedStatus {
                status: code.as_u16(),
            }),
        }
    }

    /// Creates a new pet record; the service assigns the id.
    ///
    /// Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::CreateFailed`] on any non-success status.
    pub async fn create(&self, draft: &Pet) -> Result<Pet> {
        let response = self.client.post(self.url("/pet")).json(draft).send().await?;

        let code = response.status();
        if !code.is_success() {
            error!(status = code.as_u16(), "failed to create pet");
            return Err(BlesspetsError::CreateFailed {
                status: code.as_u16(),
            });
        }

        let created: Pet = response.json().await?;
        info!(id = ?created.id, name = ?created.name, "created pet");
        Ok(created)
    }

    /// Replaces an existing pet record; `pet.id` must be set.
    ///
    /// Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::UpdateFailed`] on any non-success status.
    pub async fn update(&self, pet: &Pet) -> Result<Pet> {
        let response = self.client.put(self.url("/pet")).json(pet).send().await?;

        let code = response.status();
        if !code.is_success() {
            error!(id = ?pet.id, status = code.as_u16(), "failed to update pet");
            return Err(BlesspetsError::UpdateFailed {
                status: code.as_u16(),
            });
        }

        let updated: Pet = response.json().await?;
        info!(id = ?updated.id, "updated pet");
        Ok(updated)
    }

    /// Deletes a pet record by id.
    ///
    /// Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::DeleteFailed`] on any non-success status.
    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        let response = self.client.delete(self.url(&format!("/pet/{id}"))).send().await?;

        let code = response.status();
        if !code.is_success() {
            error!(id, status = code.as_u16(), "failed to delete pet");
            return Err(BlesspetsError::DeleteFailed {
                status: code.as_u16(),
            });
        }

        info!(id, "deleted pet");
        Ok(())
    }

    /// Uploads an image for the given pet as a multipart form.
    ///
    /// Single attempt, no retry. Returns the service-defined response body.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::UploadFailed`] on any non-success status.
    pub async fn upload_image(
        &self,
        id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<serde_json::Value> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(&format!("/pet/{id}/uploadImage")))
            .multipart(form)
            .send()
            .await?;

        let code = response.status();
        if !code.is_success() {
            error!(id, status = code.as_u16(), "failed to upload image");
            return Err(BlesspetsError::UploadFailed {
                status: code.as_u16(),
            });
        }

        info!(id, file_name, "uploaded image");
        Ok(response.json().await?)
    }

    /// Fetches the whole inventory: all three status listings concurrently,
    /// deduplicated by id with the first occurrence winning.
    ///
    /// # Errors
    ///
    /// Fails if any of the three listings exhausts its retries.
    pub async fn list_all(&self) -> Result<Vec<Pet>> {
        let (available, pending, sold) = tokio::try_join!(
            self.find_by_status(PetStatus::Available),
            self.find_by_status(PetStatus::Pending),
            self.find_by_status(PetStatus::Sold),
        )?;

        Ok(reconcile::dedupe_by_id([available, pending, sold]))
    }
}
