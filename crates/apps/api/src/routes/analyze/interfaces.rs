use utoipa::ToSchema;

/// Multipart form accepted by the analyze endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeUpload {
    /// PNG, JPEG, GIF or BMP file.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
