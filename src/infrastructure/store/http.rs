use crate::core::errors::{BilledError, RemoteError};
use crate::core::models::{BillDraft, RawBill, ReceiptUpload, UploadedReceipt};
use crate::infrastructure::store::RemoteStore;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Response, multipart};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Status used when the API could not be reached at all.
const NETWORK_FAILURE_STATUS: u16 = 503;
/// Status used when the API answered with a body that does not decode.
const INVALID_BODY_STATUS: u16 = 502;

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Client for the bills API (`GET/POST /bills`, `PATCH /bills/{key}`).
#[derive(Clone)]
pub struct HttpRemoteStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BilledError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BilledError::InternalServerError(format!("HTTP client initialization failed: {}", e)))?;
        Ok(HttpRemoteStore {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Same client, authenticated as the holder of `token`.
    pub fn with_token(&self, token: &str) -> Self {
        HttpRemoteStore {
            token: Some(token.to_string()),
            ..self.clone()
        }
    }

    pub fn bills_url(&self) -> String {
        format!("{}/bills", self.base_url)
    }

    pub fn bill_url(&self, selector: &str) -> String {
        format!("{}/bills/{}", self.base_url, selector)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ApiErrorBody>().await.ok();
            let error = match body.and_then(|b| b.message) {
                Some(message) => RemoteError::new(status.as_u16(), message),
                None => RemoteError::from_status(status.as_u16()),
            };
            warn!("Bills API answered {}: {}", status, error.message);
            return Err(error);
        }
        response.json::<T>().await.map_err(|e| {
            warn!("Bills API answered {} with an unreadable body: {}", status, e);
            RemoteError::new(INVALID_BODY_STATUS, format!("Invalid response body: {}", e))
        })
    }
}

fn network_error(e: reqwest::Error) -> RemoteError {
    match e.status() {
        Some(status) => RemoteError::from_status(status.as_u16()),
        None => RemoteError::new(NETWORK_FAILURE_STATUS, format!("Network error: {}", e)),
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_bills(&self) -> Result<Vec<RawBill>, RemoteError> {
        debug!("GET {}", self.bills_url());
        let response = self
            .authorize(self.client.get(self.bills_url()))
            .send()
            .await
            .map_err(network_error)?;
        Self::parse(response).await
    }

    async fn create_receipt(&self, upload: ReceiptUpload) -> Result<UploadedReceipt, RemoteError> {
        info!("Uploading receipt {} for {}", upload.file_name, upload.email);
        let mut part = multipart::Part::bytes(upload.bytes).file_name(upload.file_name.clone());
        if let Some(content_type) = &upload.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| RemoteError::new(400, format!("Invalid content type: {}", e)))?;
        }
        let form = multipart::Form::new().part("file", part).text("email", upload.email);
        let response = self
            .authorize(self.client.post(self.bills_url()))
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        Self::parse(response).await
    }

    async fn update_bill(&self, selector: &str, draft: BillDraft) -> Result<RawBill, RemoteError> {
        debug!("PATCH {}", self.bill_url(selector));
        let response = self
            .authorize(self.client.patch(self.bill_url(selector)))
            .json(&draft)
            .send()
            .await
            .map_err(network_error)?;
        Self::parse(response).await
    }
}
