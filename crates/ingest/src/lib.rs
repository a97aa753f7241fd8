pub mod reader;

pub use reader::FileReader;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;

/// An essay as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: String,
    pub source: String,
    pub text: String,
}

impl Submission {
    pub fn new(source: String, text: String) -> Self {
        Self {
            id: generate_submission_id(&source),
            source,
            text,
        }
    }
}

/// Generate a stable submission ID from file path
pub fn generate_submission_id(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..16])
}

pub async fn load_submission(file_path: &Path) -> Result<Submission> {
    let content = FileReader::read_file(file_path).await?;
    let path_str = file_path.to_string_lossy().to_string();
    debug!(source = %path_str, bytes = content.len(), "Loaded submission");

    Ok(Submission::new(path_str, content))
}

/// Load every `.txt` / `.md` submission in a directory
pub async fn load_directory(dir_path: &Path) -> Result<Vec<Submission>> {
    let files = FileReader::read_directory(dir_path).await?;
    debug!(dir = ?dir_path, count = files.len(), "Loaded submissions from directory");

    Ok(files
        .into_iter()
        .map(|(path, content)| Submission::new(path.to_string_lossy().to_string(), content))
        .collect())
}

/// Load a file or every submission in a directory
pub async fn load_path(path: &Path) -> Result<Vec<Submission>> {
    if path.is_dir() {
        load_directory(path).await
    } else {
        Ok(vec![load_submission(path).await?])
    }
}
