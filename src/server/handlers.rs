use crate::{
    backend::{BatchOutcome, PredictionBackend},
    batch::{CsvUpload, DOWNLOAD_FILENAME, PREVIEW_ROWS, ResultTable},
    error::InputFileError,
    record::SoilRecord,
    views::{self, CallKind, Tab},
};
use axum::{
    Form,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use std::{collections::HashMap, sync::Arc};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn PredictionBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn PredictionBackend>) -> Self {
        Self { backend }
    }
}

pub async fn about() -> Html<String> {
    Html(views::page(Tab::About, &views::about()))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn single_form() -> Html<String> {
    let body = views::single_form(&SoilRecord::default().to_form(), &[]);
    Html(views::page(Tab::Single, &body))
}

pub async fn single_submit(
    State(state): State<AppState>,
    Form(values): Form<HashMap<String, String>>,
) -> Html<String> {
    let record = match SoilRecord::from_form(&values) {
        Ok(record) => record,
        Err(errors) => {
            warn!("Rejected single prediction input: {} invalid fields", errors.len());
            return Html(views::page(Tab::Single, &views::single_form(&values, &errors)));
        }
    };

    info!("Received single prediction request: {:?}", record);

    let outcome = match state.backend.submit_single(&record).await {
        Ok(crop) => views::single_result(&crop),
        Err(e) => {
            error!("Single prediction failed: {}", e);
            views::api_error(CallKind::Single, &e)
        }
    };

    let body = format!("{}{}", views::single_form(&values, &[]), outcome);
    Html(views::page(Tab::Single, &body))
}

pub async fn batch_form() -> Html<String> {
    Html(views::page(Tab::Batch, &views::batch_page(&views::batch_info())))
}

/// Reads the `file` part of an upload. `None` when no file was chosen.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<CsvUpload>, InputFileError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| InputFileError::Upload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let has_name = field.file_name().is_some_and(|n| !n.is_empty());
        let data = field
            .bytes()
            .await
            .map_err(|e| InputFileError::Upload(e.to_string()))?;

        if !has_name && data.is_empty() {
            return Ok(None);
        }

        info!("Received batch upload ({} bytes)", data.len());
        return Ok(Some(CsvUpload::new(data.to_vec())));
    }

    Ok(None)
}

pub async fn batch_preview(mut multipart: Multipart) -> Html<String> {
    let below = match read_upload(&mut multipart).await {
        Ok(None) => views::batch_info(),
        Ok(Some(upload)) => match upload.preview(PREVIEW_ROWS) {
            Ok(preview) => views::batch_preview(&preview, &upload.to_staged()),
            Err(e) => {
                warn!("Uploaded CSV could not be parsed: {}", e);
                views::input_file_error(&e)
            }
        },
        Err(e) => {
            warn!("Upload could not be read: {}", e);
            views::input_file_error(&e)
        }
    };

    Html(views::page(Tab::Batch, &views::batch_page(&below)))
}

/// Reads a staged base64 field from a batch form post.
fn staged_field<'a>(
    form: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str, InputFileError> {
    form.get(name)
        .map(String::as_str)
        .ok_or(InputFileError::MissingField(name))
}

pub async fn batch_submit(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let upload = match staged_field(&form, "payload").and_then(CsvUpload::from_staged) {
        Ok(upload) => upload,
        Err(e) => {
            warn!("Staged batch payload rejected: {}", e);
            let below = views::input_file_error(&e);
            return Html(views::page(Tab::Batch, &views::batch_page(&below)));
        }
    };

    let below = match state.backend.submit_batch(&upload).await {
        Ok(BatchOutcome::Rows(rows)) => {
            let results = ResultTable::project(&rows);
            match results.to_csv() {
                Ok(csv) => views::batch_results(&results, &URL_SAFE_NO_PAD.encode(csv)),
                Err(e) => {
                    error!("Failed to export batch results: {}", e);
                    views::results_error(&e.to_string())
                }
            }
        }
        Ok(BatchOutcome::Unexpected(body)) => views::batch_unexpected(&body),
        Err(e) => {
            error!("Batch prediction failed: {}", e);
            views::api_error(CallKind::Batch, &e)
        }
    };

    Html(views::page(Tab::Batch, &views::batch_page(&below)))
}

pub async fn batch_download(Form(form): Form<HashMap<String, String>>) -> Response {
    let csv = staged_field(&form, "csv").and_then(|staged| {
        URL_SAFE_NO_PAD
            .decode(staged.trim())
            .map_err(InputFileError::from)
    });

    match csv {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            warn!("Staged results payload rejected: {}", e);
            let below = views::results_error(&e.to_string());
            (
                StatusCode::BAD_REQUEST,
                Html(views::page(Tab::Batch, &views::batch_page(&below))),
            )
                .into_response()
        }
    }
}
