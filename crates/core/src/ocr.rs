//! OCR text extraction for uploaded card photos.
//!
//! OCR is an external collaborator with no accuracy contract. The
//! production extractor pipes the image into the `tesseract` CLI; tests and
//! offline setups can inject any other [`TextExtractor`].

use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use image::ImageFormat;
use regex::Regex;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

/// Maximum OCR output captured (1 MiB); card text is tiny.
const MAX_OUTPUT_BYTES: u64 = 1024 * 1024;

/// Image formats accepted for upload.
const SUPPORTED_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// Errors from an OCR engine.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Unsupported image data: {0}")]
    UnsupportedImage(String),

    #[error("Failed to run OCR engine: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR engine exited with code {code}: {stderr}")]
    Failed { code: i32, stderr: String },

    #[error("OCR timed out after {0:?}")]
    Timeout(Duration),
}

/// Maps image bytes to the text printed on the card.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, image: &[u8]) -> Result<String, OcrError>;
}

/// Check that `bytes` look like a supported image before handing them to OCR.
pub fn ensure_supported_image(bytes: &[u8]) -> Result<ImageFormat, OcrError> {
    let format = image::guess_format(bytes)
        .map_err(|_| OcrError::UnsupportedImage("not a recognised image".into()))?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(OcrError::UnsupportedImage(format!(
            "{format:?} is not supported; use PNG, JPEG or WebP"
        )));
    }
    Ok(format)
}

static EDGE_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\p{L}\p{N}]+|[^\p{L}\p{N}]+$").expect("edge noise pattern is valid")
});

/// Pick the most likely card name from raw OCR output.
///
/// Card names are printed on the top line, so this is the first line that
/// still has text after stripping leading/trailing punctuation noise.
pub fn name_candidate(text: &str) -> Option<String> {
    text.lines()
        .map(|line| EDGE_NOISE.replace_all(line.trim(), "").into_owned())
        .find(|line| !line.is_empty())
}

/// Runs the `tesseract` binary as `tesseract stdin stdout`.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: String,
    timeout: Duration,
}

impl TesseractCli {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

#[async_trait]
impl TextExtractor for TesseractCli {
    async fn extract_text(&self, image: &[u8]) -> Result<String, OcrError> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Writing and reading happen concurrently so a large image cannot
        // deadlock against a full stdout pipe.
        let mut stdin = child.stdin.take();
        let payload = image.to_vec();
        let writer = tokio::spawn(async move {
            if let Some(stdin) = stdin.as_mut() {
                let _ = stdin.write_all(&payload).await;
            }
        });

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let reader = async { tokio::join!(read_capped(stdout), read_capped(stderr)) };

        let run = async {
            let (out, err) = reader.await;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, out, err))
        };

        let (status, out, err) = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| OcrError::Timeout(self.timeout))??;
        let _ = writer.await;

        if !status.success() {
            return Err(OcrError::Failed {
                code: status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&err).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&out).into_owned();
        tracing::debug!(chars = text.len(), "OCR text extracted");
        Ok(text)
    }
}

/// Read up to [`MAX_OUTPUT_BYTES`] and discard the rest so the child never
/// blocks on a full pipe.
async fn read_capped<R: AsyncRead + Unpin>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = (&mut pipe).take(MAX_OUTPUT_BYTES).read_to_end(&mut buf).await;
        let _ = tokio::io::copy(&mut pipe, &mut tokio::io::sink()).await;
    }
    buf
}
