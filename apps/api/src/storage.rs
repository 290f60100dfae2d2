//! S3 storage for uploaded resume originals.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// Uploads the original PDF bytes and returns the object key.
pub async fn upload_resume_pdf(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    user_id: Uuid,
    bytes: Bytes,
) -> Result<String, AppError> {
    let key = format!("resumes/{}/{}.pdf", user_id, Uuid::new_v4());

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(bytes))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("PDF upload failed: {e}")))?;

    info!("Uploaded resume original to s3://{}/{}", bucket, key);
    Ok(key)
}
