//! Input manager for loading resume files from disk

use crate::error::{Result, ResumeScorerError};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor;
use crate::processing::document::JobDescriptionInput;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Default upper bound for a single input file (10 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Loads documents for the scoring core.
///
/// The core itself never reads files; this is the caller-side layer that
/// enforces the size limit, picks the format from the extension and keeps
/// an in-memory cache of extracted text.
pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_bytes: u64,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        self.check_file(path).await?;
        let format = self.detect_format(path)?;

        info!("Extracting {:?} text from: {}", format, path.display());
        let bytes = fs::read(path).await?;
        let text = text_extractor::extract_format(&bytes, format)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Load a job description.
    ///
    /// `.toml` and `.json` files are deserialized field by field; any other
    /// supported document becomes a description-only job.
    pub async fn load_job(&mut self, path: &Path) -> Result<JobDescriptionInput> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        let job: JobDescriptionInput = match extension.as_str() {
            "toml" => {
                let content = self.read_structured(path).await?;
                toml::from_str(&content).map_err(|e| {
                    ResumeScorerError::InvalidInput(format!("Invalid job file {}: {}", path.display(), e))
                })?
            }
            "json" => {
                let content = self.read_structured(path).await?;
                serde_json::from_str(&content)?
            }
            _ => JobDescriptionInput::new(self.extract_text(path).await?),
        };

        if job.description.trim().is_empty() {
            warn!("Job description in {} is empty", path.display());
        }
        Ok(job)
    }

    async fn read_structured(&self, path: &Path) -> Result<String> {
        self.check_file(path).await?;
        info!("Loading job description from: {}", path.display());
        Ok(fs::read_to_string(path).await?)
    }

    /// The file must exist and fit the size limit.
    async fn check_file(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ResumeScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let size = fs::metadata(path).await?.len();
        if size > self.max_file_bytes {
            return Err(ResumeScorerError::InvalidInput(format!(
                "File {} is {} bytes, limit is {} bytes",
                path.display(),
                size,
                self.max_file_bytes
            )));
        }
        Ok(())
    }

    fn detect_format(&self, path: &Path) -> Result<DocumentFormat> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeScorerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        DocumentFormat::from_extension(extension)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
