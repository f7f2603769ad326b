//! HTML rendering for the three tabs. Every function returns a fragment or a
//! full page as a `String`; handlers wrap it in `axum::response::Html`.

use crate::{
    backend::Crop,
    batch::{Preview, ResultTable},
    error::{ApiError, InputFileError},
    record::{FIELDS, FieldError, FieldGroup},
};
use serde_json::Value;
use std::collections::HashMap;

pub const TITLE: &str = "Crop Recommendation System";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    About,
    Single,
    Batch,
}

impl Tab {
    const ALL: [Tab; 3] = [Self::About, Self::Single, Self::Batch];

    fn href(self) -> &'static str {
        match self {
            Self::About => "/",
            Self::Single => "/single",
            Self::Batch => "/batch",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Single => "Single Prediction",
            Self::Batch => "Batch Prediction",
        }
    }
}

/// Which call an error came from; only changes the wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Single,
    Batch,
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; background: #f5f7fa; color: #333; }
header { background: #2e7d32; color: white; padding: 2em; text-align: center; }
nav { display: flex; gap: 1em; justify-content: center; padding: 1em; background: white; }
nav a { color: #2e7d32; text-decoration: none; padding: .4em 1em; border-radius: 6px; }
nav a.active { background: #e8f5e9; font-weight: bold; }
main { max-width: 1100px; margin: 0 auto; padding: 1em 2em; }
.card { background: white; border-radius: 10px; padding: 1.5em; margin: 1em 0; border-left: 5px solid #4caf50; }
.columns { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.5em; }
.result { background: #c8e6c9; border-radius: 12px; padding: 2em; text-align: center; margin: 1.5em 0; }
.result h1 { color: #2e7d32; font-size: 3em; margin: 0; }
.error { background: #ffebee; border-left: 5px solid #c62828; padding: 1em; margin: 1em 0; }
.warning { background: #fff8e1; border-left: 5px solid #f9a825; padding: 1em; margin: 1em 0; }
.info { background: #e3f2fd; border-left: 5px solid #1565c0; padding: 1em; margin: 1em 0; }
table { border-collapse: collapse; width: 100%; background: white; }
th, td { border: 1px solid #ddd; padding: .4em .8em; text-align: right; }
pre { background: #f0f0f0; padding: 1em; overflow-x: auto; }
label { display: block; margin-top: .8em; }
input[type=number] { width: 100%; }
button { margin-top: 1em; padding: .6em 1.5em; background: #2e7d32; color: white; border: 0; border-radius: 6px; }
"#;

pub fn page(active: Tab, body: &str) -> String {
    let nav: String = Tab::ALL
        .iter()
        .map(|tab| {
            let class = if *tab == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{}\"{}>{}</a>", tab.href(), class, tab.label())
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{TITLE}</title><style>{STYLE}</style></head>
<body>
<header><h1>{TITLE}</h1><p>Soil and climate data in, crop recommendation out</p></header>
<nav>{nav}</nav>
<main>{body}</main>
</body></html>"#
    )
}

pub fn about() -> String {
    let parameters: String = FIELDS
        .iter()
        .map(|f| {
            format!(
                "<li><code>{}</code> {} ({} to {})</li>",
                f.key,
                escape(f.label),
                f.min,
                f.max
            )
        })
        .collect();

    format!(
        r#"<div class="card"><h3>About</h3>
<p>This application recommends the crop best suited to a set of soil and climate
conditions. The classification itself runs in a separate prediction service; this
site collects the inputs, forwards them and shows the answer.</p></div>
<div class="card"><h3>Input parameters</h3><ul>{parameters}</ul></div>
<div class="card"><h3>How to use it</h3>
<p>Use <a href="/single">Single Prediction</a> for one set of conditions, or upload a
CSV file on <a href="/batch">Batch Prediction</a> to score many records at once.</p></div>"#
    )
}

/// The single-record form. `values` holds what the user typed, so rejected
/// input is shown back as entered.
pub fn single_form(values: &HashMap<String, String>, errors: &[FieldError]) -> String {
    let columns: String = FieldGroup::ALL
        .iter()
        .map(|group| {
            let inputs: String = FIELDS
                .iter()
                .filter(|f| f.group == *group)
                .map(|f| {
                    let value = values
                        .get(f.key)
                        .cloned()
                        .unwrap_or_else(|| f.default.to_string());
                    format!(
                        r#"<label>{label}<input type="number" name="{key}" min="{min}" max="{max}" step="{step}" value="{value}"></label>"#,
                        label = escape(f.label),
                        key = f.key,
                        min = f.min,
                        max = f.max,
                        step = f.step,
                        value = escape(&value),
                    )
                })
                .collect();
            format!("<div><strong>{}</strong>{}</div>", escape(group.title()), inputs)
        })
        .collect();

    let problems: String = if errors.is_empty() {
        String::new()
    } else {
        let items: String = errors
            .iter()
            .map(|e| format!("<li>{}</li>", escape(&e.to_string())))
            .collect();
        format!(r#"<div class="error"><strong>Please fix the following inputs:</strong><ul>{items}</ul></div>"#)
    };

    format!(
        r#"<div class="card"><h3>Single Crop Recommendation</h3>
<p>Enter soil and climate parameters below to receive a crop recommendation.</p></div>
{problems}
<form method="post" action="/single">
<div class="columns">{columns}</div>
<button type="submit">Get Recommendation</button>
</form>"#
    )
}

pub fn single_result(crop: &Crop) -> String {
    format!(
        r#"<div class="result"><h2>Recommended Crop</h2><h1>{}</h1>
<p>This crop is optimal for your soil and climate conditions.</p></div>"#,
        escape(&crop.display_name())
    )
}

pub fn api_error(kind: CallKind, err: &ApiError) -> String {
    match err {
        ApiError::Backend { status, body } => format!(
            r#"<div class="error">Backend returned status {status}</div><pre>{}</pre>"#,
            escape(body)
        ),
        ApiError::Transport(detail) => {
            let heading = match kind {
                CallKind::Single => "Error while calling backend API.",
                CallKind::Batch => "Error while calling backend batch API.",
            };
            format!(
                r#"<div class="error">{heading}</div><pre>{}</pre>"#,
                escape(detail)
            )
        }
    }
}

fn batch_intro() -> String {
    let columns: String = FIELDS
        .iter()
        .map(|f| format!("<code>{}</code> ", f.key))
        .collect();

    format!(
        r#"<div class="card"><h3>Batch Crop Recommendation from CSV</h3>
<p>Upload a CSV file containing multiple soil and climate records to receive bulk crop recommendations.</p>
<p>Your CSV file must include the following columns: {columns}</p>
<p>Each row represents one soil/climate record.</p></div>
<form method="post" action="/batch/preview" enctype="multipart/form-data">
<input type="file" name="file" accept=".csv,text/csv">
<button type="submit">Upload</button>
</form>"#
    )
}

/// The upload form with an optional fragment below it.
pub fn batch_page(below: &str) -> String {
    format!("{}{}", batch_intro(), below)
}

pub fn batch_info() -> String {
    r#"<div class="info">Please upload a CSV file to enable batch prediction.</div>"#.to_string()
}

pub fn input_file_error(err: &InputFileError) -> String {
    format!(
        r#"<div class="error">Could not read the uploaded CSV file.</div><pre>{}</pre>"#,
        escape(&err.to_string())
    )
}

/// Failure on the output side: exporting or returning the result CSV.
pub fn results_error(detail: &str) -> String {
    format!(
        r#"<div class="error">Could not prepare the prediction results for download.</div><pre>{}</pre>"#,
        escape(detail)
    )
}

fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|c| format!("<td>{}</td>", escape(c)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
}

/// Preview of an upload plus the submit form carrying the staged bytes.
pub fn batch_preview(preview: &Preview, staged: &str) -> String {
    format!(
        r#"<div class="card"><h4>Preview of Uploaded Data</h4>
<p>Showing {} of {} rows.</p></div>
{}
<form method="post" action="/batch">
<input type="hidden" name="payload" value="{}">
<button type="submit">Get Batch Predictions</button>
</form>"#,
        preview.rows.len(),
        preview.total_rows,
        table(&preview.headers, &preview.rows),
        escape(staged)
    )
}

pub fn batch_results(results: &ResultTable, staged_csv: &str) -> String {
    format!(
        r#"<div class="result"><h3>Predictions Complete!</h3>
<p>Successfully processed <strong>{}</strong> records</p></div>
<div class="card"><h4>Prediction Results</h4></div>
{}
<form method="post" action="/batch/download">
<input type="hidden" name="csv" value="{}">
<button type="submit">Download Predictions as CSV</button>
</form>"#,
        results.len(),
        table(results.headers(), results.rows()),
        escape(staged_csv)
    )
}

pub fn batch_unexpected(body: &Value) -> String {
    let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
    format!(
        r#"<div class="warning">Backend returned an unexpected format. Showing raw response:</div><pre>{}</pre>"#,
        escape(&pretty)
    )
}
