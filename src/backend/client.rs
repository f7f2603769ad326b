use super::types::{BatchOutcome, Crop};
use crate::{
    batch::{CsvUpload, UPLOAD_FILENAME},
    config::BackendConfig,
    error::ApiError,
    record::SoilRecord,
};
use async_trait::async_trait;
use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// The prediction service as seen by the form layer. One call per user action.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    async fn submit_single(&self, record: &SoilRecord) -> Result<Crop, ApiError>;

    async fn submit_batch(&self, upload: &CsvUpload) -> Result<BatchOutcome, ApiError>;
}

/// HTTP implementation against `{base_url}/predict` and `{base_url}/batch_predict`.
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> crate::Result<Self> {
        let client = reqwest::Client::builder().build()?;

        debug!("Creating backend client for: {}", config.base_url);

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

/// Maps a response to its JSON body, or to an [`ApiError`] for any status but 200.
async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();

    if status != StatusCode::OK {
        let body = response.text().await.map_err(ApiError::from_reqwest)?;
        warn!("Backend returned status {}: {}", status.as_u16(), body);
        return Err(ApiError::Backend {
            status: status.as_u16(),
            body,
        });
    }

    response.json::<Value>().await.map_err(ApiError::from_reqwest)
}

#[async_trait]
impl PredictionBackend for HttpBackend {
    async fn submit_single(&self, record: &SoilRecord) -> Result<Crop, ApiError> {
        let url = self.config.predict_url();
        debug!("Submitting single record to {}", url);

        let response = self
            .client
            .post(&url)
            .json(record)
            .timeout(self.config.single_timeout())
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let body = read_json(response).await?;
        let crop = Crop::from_response(&body);

        info!("Backend recommended crop: {}", crop);
        Ok(crop)
    }

    async fn submit_batch(&self, upload: &CsvUpload) -> Result<BatchOutcome, ApiError> {
        let url = self.config.batch_predict_url();
        debug!(
            "Submitting batch of {} bytes to {}",
            upload.bytes().len(),
            url
        );

        let part = Part::bytes(upload.bytes().to_vec())
            .file_name(UPLOAD_FILENAME)
            .mime_str("text/csv")
            .map_err(ApiError::from_reqwest)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.config.batch_timeout())
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let outcome = BatchOutcome::from_response(read_json(response).await?);

        match &outcome {
            BatchOutcome::Rows(rows) => info!("Backend returned {} batch rows", rows.len()),
            BatchOutcome::Unexpected(_) => warn!("Backend batch response was not an array"),
        }

        Ok(outcome)
    }
}
