use crate::client::models::selection::SelectedFile;
use crate::common::errors::UploadError;
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum Message {
    NoOp,
    // Selezione immagine
    PickFile,
    FileLoaded(SelectedFile),
    FileRejected(String),
    // Upload
    Submit,
    UploadFinished { generation: u64, outcome: Result<Value, UploadError> },
    ToggleTheme,
}
