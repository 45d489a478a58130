use crate::client::models::selection::SelectedFile;
use crate::common::errors::SelectionError;
use log::info;
use std::path::Path;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// MIME type for an image extension, `None` when it is not an image we send.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "bmp" => Some("image/bmp"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Open the native dialog. `None` when the user cancels.
pub async fn pick_image(max_bytes: u64) -> Option<Result<SelectedFile, SelectionError>> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Select image")
        .add_filter("images", &IMAGE_EXTENSIONS)
        .pick_file()
        .await?;
    Some(load_image(handle.path(), max_bytes).await)
}

/// Read and validate an image from disk.
pub async fn load_image(path: &Path, max_bytes: u64) -> Result<SelectedFile, SelectionError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = mime_for_extension(&ext).ok_or_else(|| SelectionError::UnsupportedType(file_name.clone()))?;

    let size = tokio::fs::metadata(path).await?.len();
    if size > max_bytes {
        return Err(SelectionError::TooLarge { size, max: max_bytes });
    }

    let bytes = tokio::fs::read(path).await?;
    info!("[PICKER] loaded {} ({} bytes)", path.display(), bytes.len());
    Ok(SelectedFile {
        file_name,
        path: Some(path.to_path_buf()),
        mime: mime.to_string(),
        bytes,
    })
}
