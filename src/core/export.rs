use crate::domain::model::AdviceResponse;
use crate::domain::ports::Storage;
use crate::utils::error::{LocatorError, Result};
use chrono::{DateTime, Utc};

pub const DEFAULT_SUMMARY_FILENAME: &str = "patient_summary.txt";

/// Plain-text summary handed to the patient: the advice message verbatim plus sources.
pub fn render_summary(response: &AdviceResponse, generated_at: DateTime<Utc>) -> String {
    let mut out = format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(recommendation) = &response.recommendation {
        out.push_str(&format!("Recommended branch: {}\n\n", recommendation));
    }
    out.push_str(&response.message);
    if !response.message.ends_with('\n') {
        out.push('\n');
    }

    if !response.citations.is_empty() {
        out.push_str("\nSources:\n");
        for citation in &response.citations {
            out.push_str(&format!("- {} <{}>\n", citation.title, citation.uri));
        }
    }
    out
}

pub async fn export_summary<S: Storage>(
    storage: &S,
    response: Option<&AdviceResponse>,
    filename: &str,
) -> Result<String> {
    let response = response.ok_or_else(|| LocatorError::ProcessingError {
        message: "no advice available to export".to_string(),
    })?;

    let text = render_summary(response, Utc::now());
    tracing::debug!("Writing summary ({} bytes) to {}", text.len(), filename);
    storage.write_file(filename, text.as_bytes()).await?;
    Ok(filename.to_string())
}
