//! Wire types for the workbook generation flow.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workbook_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_file_id: Option<String>,
    pub enhanced: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenerateResponse {
    pub job_id: String,
}

/// Server-side job state. Terminal states carry their payload inline.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Done { download_url: String },
    Failed { error: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done { .. } | JobStatus::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Queued => "Queued",
            JobStatus::Running => "Generating",
            JobStatus::Done { .. } => "Ready",
            JobStatus::Failed { .. } => "Failed",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UploadResponse {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::JobStatus;

    #[test]
    fn job_states_decode_from_tagged_payloads() {
        let queued: JobStatus = serde_json::from_str(r#"{"status":"queued"}"#).expect("decode");
        assert_eq!(queued, JobStatus::Queued);
        assert!(!queued.is_terminal());

        let done: JobStatus =
            serde_json::from_str(r#"{"status":"done","download_url":"https://x/wb.xlsx"}"#)
                .expect("decode");
        assert!(done.is_terminal());
        assert_eq!(
            done,
            JobStatus::Done {
                download_url: "https://x/wb.xlsx".to_string()
            }
        );

        let failed: JobStatus =
            serde_json::from_str(r#"{"status":"failed","error":"model overloaded"}"#)
                .expect("decode");
        assert!(failed.is_terminal());
    }
}
