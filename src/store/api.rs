//! HTTP client for the bills API

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response};
use tracing::{debug, info, warn};

use super::BillStore;
use crate::config::Config;
use crate::errors::{BilledError, Result};
use crate::models::{Bill, BillDraft, ReceiptFile, UploadedReceipt};

const BILLS_ENDPOINT: &str = "/bills";

pub struct ApiStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiStore {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Message shown for a non-success response, e.g. `Erreur 404`
fn status_message(response: &Response) -> String {
    format!("Erreur {}", response.status().as_u16())
}

#[async_trait]
impl BillStore for ApiStore {
    async fn list(&self) -> Result<Vec<Bill>> {
        let url = self.url(BILLS_ENDPOINT);
        debug!("Fetching bills from: {}", url);

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| BilledError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            let message = status_message(&response);
            warn!("Bill list request failed: {}", message);
            return Err(BilledError::FetchFailed(message));
        }

        let bills: Vec<Bill> = response
            .json()
            .await
            .map_err(|e| BilledError::FetchFailed(e.to_string()))?;
        info!("Fetched {} bills", bills.len());
        Ok(bills)
    }

    async fn upload(&self, receipt: &ReceiptFile, email: &str) -> Result<UploadedReceipt> {
        let url = self.url(BILLS_ENDPOINT);
        debug!("Uploading receipt {} to: {}", receipt.file_name(), url);

        let file = multipart::Part::bytes(receipt.bytes.clone())
            .file_name(receipt.file_name().to_string())
            .mime_str(&receipt.mime_type())
            .map_err(|e| BilledError::CreateFailed(e.to_string()))?;
        let form = multipart::Form::new()
            .part("file", file)
            .text("email", email.to_string());

        let response = self
            .authorized(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BilledError::CreateFailed(e.to_string()))?;

        if !response.status().is_success() {
            let message = status_message(&response);
            warn!("Receipt upload failed: {}", message);
            return Err(BilledError::CreateFailed(message));
        }

        response
            .json()
            .await
            .map_err(|e| BilledError::CreateFailed(e.to_string()))
    }

    async fn create(&self, draft: &BillDraft) -> Result<Bill> {
        let builder = match draft.key {
            Some(ref key) => self.client.patch(self.url(&format!("{}/{}", BILLS_ENDPOINT, key))),
            None => self.client.post(self.url(BILLS_ENDPOINT)),
        };

        let response = self
            .authorized(builder)
            .json(draft)
            .send()
            .await
            .map_err(|e| BilledError::CreateFailed(e.to_string()))?;

        if !response.status().is_success() {
            let message = status_message(&response);
            warn!("Bill creation failed: {}", message);
            return Err(BilledError::CreateFailed(message));
        }

        let bill: Bill = response
            .json()
            .await
            .map_err(|e| BilledError::CreateFailed(e.to_string()))?;
        info!("Created bill {}", bill.id);
        Ok(bill)
    }
}
