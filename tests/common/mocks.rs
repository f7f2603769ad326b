use async_trait::async_trait;
use crop_advisor::{
    ApiError,
    backend::{BatchOutcome, Crop, PredictionBackend},
    batch::CsvUpload,
    record::SoilRecord,
};
use std::sync::{Arc, Mutex};

/// Mock prediction backend for router tests
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub single: Result<Crop, ApiError>,
    pub batch: Result<BatchOutcome, ApiError>,
    pub single_requests: Arc<Mutex<Vec<SoilRecord>>>,
    pub batch_requests: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            single: Ok(Crop::new("rice")),
            batch: Ok(BatchOutcome::Rows(Vec::new())),
            single_requests: Arc::new(Mutex::new(Vec::new())),
            batch_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_single(mut self, result: Result<Crop, ApiError>) -> Self {
        self.single = result;
        self
    }

    pub fn with_batch(mut self, result: Result<BatchOutcome, ApiError>) -> Self {
        self.batch = result;
        self
    }

    pub fn single_calls(&self) -> Vec<SoilRecord> {
        self.single_requests.lock().unwrap().clone()
    }

    pub fn batch_calls(&self) -> Vec<Vec<u8>> {
        self.batch_requests.lock().unwrap().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionBackend for MockBackend {
    async fn submit_single(&self, record: &SoilRecord) -> Result<Crop, ApiError> {
        self.single_requests.lock().unwrap().push(*record);
        self.single.clone()
    }

    async fn submit_batch(&self, upload: &CsvUpload) -> Result<BatchOutcome, ApiError> {
        self.batch_requests
            .lock()
            .unwrap()
            .push(upload.bytes().to_vec());
        self.batch.clone()
    }
}
