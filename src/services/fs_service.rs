use crate::error::AppError;
use crate::models::file_types::SelectedFile;
use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tiff", "image/tiff"),
    ("tif", "image/tiff"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
];

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Look at the magic bytes when the extension tells us nothing.
fn sniff_mime(content: &[u8]) -> Option<&'static str> {
    image::guess_format(content)
        .ok()
        .map(|format| format.to_mime_type())
}

/// Read a file from disk the way the picker would hand it over: raw bytes,
/// the bare file name, and a declared MIME type.
pub async fn load_selected_file(path: &Path) -> Result<SelectedFile, AppError> {
    if !path.exists() {
        return Err(format!("Path does not exist: {}", path.display()).into());
    }
    if path.is_dir() {
        return Err(format!("Not a file: {}", path.display()).into());
    }

    let content = tokio::fs::read(path).await.map_err(|e| AppError {
        message: format!("Cannot read file {}: {}", path.display(), e),
    })?;

    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let mime_type = mime_for_path(path)
        .or_else(|| sniff_mime(&content))
        .unwrap_or(FALLBACK_MIME);

    Ok(SelectedFile::new(name, mime_type, content))
}
