use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use crop_advisor::{
    backend::PredictionBackend,
    server::{self, handlers::AppState},
};
use std::sync::Arc;

pub const BODY_LIMIT: usize = 1024 * 1024;

pub const MULTIPART_BOUNDARY: &str = "----cropadvisortestboundary";

pub const SAMPLE_CSV: &str = "N,P,K,temperature,humidity,ph,rainfall\n\
90,42,43,20.87,82.0,6.5,202.93\n\
85,58,41,21.77,80.31,7.03,226.65\n\
60,55,44,23.0,82.32,7.84,263.96\n";

/// Build the application router around a backend
pub fn create_test_app(backend: Arc<dyn PredictionBackend>) -> Router {
    server::router(AppState::new(backend), BODY_LIMIT)
}

/// A multipart body with a single `file` part, as a browser would send it
pub fn multipart_upload(filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/csv\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/batch/preview")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// A urlencoded form post. Values must already be urlencoding-safe.
pub fn form_post(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Pull the value of a hidden input out of a rendered page
pub fn hidden_value(html: &str, name: &str) -> Option<String> {
    let marker = format!("name=\"{name}\" value=\"");
    let start = html.find(&marker)? + marker.len();
    let end = html[start..].find('"')?;
    Some(html[start..start + end].to_string())
}
