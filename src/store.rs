//! Remote store collaborators.
//!
//! The record store and the file store are external services; this module is
//! the only place that talks to them. `StudentStore` is the seam the
//! controller depends on, with `HttpStore` as the production implementation.

use crate::model::{PendingFile, StudentRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Persistence collaborator for student records and bulk files.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Fetch all records in store-defined order. The order is trusted as-is;
    /// reconciliation depends on it.
    async fn fetch_students(&self) -> Result<Vec<StudentRecord>>;

    /// Store one record. The acknowledgement body is ignored beyond success.
    async fn store_record(&self, record: &StudentRecord) -> Result<()>;

    /// Forward a bulk file opaquely to the file store.
    async fn upload_file(&self, file: &PendingFile) -> Result<()>;
}

/// HTTP implementation against the record/file store endpoints.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("marksheet-cli/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl StudentStore for HttpStore {
    async fn fetch_students(&self) -> Result<Vec<StudentRecord>> {
        let records = self
            .client
            .get(self.url("/students"))
            .send()
            .await
            .context("GET /students")?
            .error_for_status()
            .context("GET /students status")?
            .json::<Vec<StudentRecord>>()
            .await
            .context("decode student records")?;
        Ok(records)
    }

    async fn store_record(&self, record: &StudentRecord) -> Result<()> {
        self.client
            .post(self.url("/students"))
            .json(record)
            .send()
            .await
            .context("POST /students")?
            .error_for_status()
            .context("POST /students status")?;
        Ok(())
    }

    async fn upload_file(&self, file: &PendingFile) -> Result<()> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .with_context(|| format!("read {}", file.path.display()))?;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file.file_name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);
        self.client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .context("POST /upload")?
            .error_for_status()
            .context("POST /upload status")?;
        Ok(())
    }
}
