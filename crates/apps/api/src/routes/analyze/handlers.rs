use crate::analyze::error::AnalyzeApiError;
use crate::analyze::interfaces::AnalyzeUpload;
use crate::api_state::ApiContext;
use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use ml_analysis::AnalysisReport;
use tracing::{info, instrument, warn};

/// Classifies, captions and scores an uploaded image.
///
/// # Errors
///
/// Returns an `AnalyzeApiError` when the upload is missing, has an unsupported
/// extension, is too large, or cannot be decoded. Failures of individual models
/// are reported inside the response instead.
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "Analysis",
    request_body(content = AnalyzeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis of the uploaded image", body = AnalysisReport),
        (status = 400, description = "No image, unsupported format, or undecodable image"),
        (status = 413, description = "Upload exceeds the configured size limit"),
        (status = 500, description = "An internal error occurred"),
    )
)]
#[instrument(skip_all, err(Display))]
pub async fn analyze_image(
    State(context): State<ApiContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisReport>, AnalyzeApiError> {
    let multipart = multipart.map_err(|rejection| {
        warn!("Request is not a multipart upload: {rejection}");
        AnalyzeApiError::NoImage
    })?;
    let (filename, data) = read_image_field(multipart).await?;

    if filename.is_empty() {
        return Err(AnalyzeApiError::NoFileSelected);
    }
    if !context.settings.api.is_allowed_file(&filename) {
        return Err(AnalyzeApiError::UnsupportedFormat);
    }

    info!("Analyzing upload '{filename}' ({} bytes)", data.len());
    let report = context.analyzer.analyze(data.to_vec()).await?;
    Ok(Json(report))
}

/// Finds the `image` field and reads it fully.
async fn read_image_field(mut multipart: Multipart) -> Result<(String, Bytes), AnalyzeApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        return Ok((filename, data));
    }
    Err(AnalyzeApiError::NoImage)
}
