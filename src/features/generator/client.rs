//! API calls for starting generation jobs and watching them finish.

use crate::app_lib::api::{self, RequestOptions};
use crate::app_lib::browser::FileHandle;
use crate::app_lib::{AppError, get_json, post_json};

use super::types::{GenerateRequest, GenerateResponse, JobStatus, UploadResponse};

fn authed(bearer: Option<&str>) -> RequestOptions {
    match bearer {
        Some(token) => RequestOptions::new().bearer(token),
        None => RequestOptions::new(),
    }
}

/// Kicks off a workbook generation job. The server answers with a job id
/// that `job_status` polls until a terminal state.
pub async fn start_generation(
    request: &GenerateRequest,
    bearer: Option<&str>,
    csrf: Option<&str>,
) -> Result<GenerateResponse, AppError> {
    let options = match csrf {
        Some(token) => authed(bearer).csrf(token),
        None => authed(bearer),
    };
    post_json("generate", request, &options).await
}

pub async fn job_status(job_id: &str, bearer: Option<&str>) -> Result<JobStatus, AppError> {
    let path = format!("generate/status/{job_id}");
    get_json(&path, &authed(bearer)).await
}

/// Uploads a reference workbook the generator can imitate. Multipart with
/// the long upload deadline; see the upload helper for the wire details.
pub async fn upload_reference(
    file: &FileHandle,
    bearer: Option<&str>,
) -> Result<UploadResponse, AppError> {
    api::upload("upload", file, "file", &[], &authed(bearer)).await
}
