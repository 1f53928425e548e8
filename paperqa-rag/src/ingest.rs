//! Plain-text page loading.
//!
//! [`TextLoader`] reads every `.txt` file in a folder and splits it into
//! pages at form-feed characters, the page separator written by common
//! PDF-to-text converters. File parsing beyond that is out of scope: page
//! text is passed through as opaque text.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::document::Document;
use crate::error::{RagError, Result};

/// Page separator in extracted text.
pub const PAGE_BREAK: char = '\u{000C}';

/// Loads [`Document`] pages from a folder of text files.
///
/// # Example
///
/// ```rust,ignore
/// use paperqa_rag::TextLoader;
///
/// let pages = TextLoader::new("data").with_source_trailer(true).load()?;
/// ```
#[derive(Debug, Clone)]
pub struct TextLoader {
    folder: PathBuf,
    extension: String,
    source_trailer: bool,
}

impl TextLoader {
    /// Create a loader for `.txt` files in `folder`.
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into(), extension: "txt".to_string(), source_trailer: false }
    }

    /// Load files with a different extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Append `SOURCE: {filename} PAGE: {page}` to every page's text, so the
    /// provenance is also visible to the model inside the context.
    pub fn with_source_trailer(mut self, enabled: bool) -> Self {
        self.source_trailer = enabled;
        self
    }

    /// Read all matching files, sorted by file name, into pages.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IngestionError`] if the folder cannot be listed or
    /// a file cannot be read as UTF-8 text.
    pub fn load(&self) -> Result<Vec<Document>> {
        let entries = std::fs::read_dir(&self.folder).map_err(|e| {
            error!(folder = %self.folder.display(), error = %e, "failed to list folder");
            ingestion_error(&self.folder, format!("failed to list folder: {e}"))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| ingestion_error(&self.folder, format!("failed to read entry: {e}")))?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == self.extension.as_str())
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::new();
        for path in &paths {
            documents.extend(self.load_file(path)?);
        }

        info!(file_count = paths.len(), page_count = documents.len(), "loaded pages");
        Ok(documents)
    }

    /// Read a single file into pages.
    pub fn load_file(&self, path: &Path) -> Result<Vec<Document>> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "failed to read file");
            ingestion_error(path, format!("failed to read file: {e}"))
        })?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let pages = split_pages(&text, &filename, self.source_trailer);
        debug!(%filename, page_count = pages.len(), "read file");
        Ok(pages)
    }
}

/// Split extracted text into 1-based pages.
///
/// A trailing page break does not start an extra page.
pub fn split_pages(text: &str, filename: &str, source_trailer: bool) -> Vec<Document> {
    let body = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
    body.split(PAGE_BREAK)
        .enumerate()
        .map(|(i, page)| {
            let page_number = i as u32 + 1;
            let text = if source_trailer {
                format!("{page}\nSOURCE: {filename} PAGE: {page_number}")
            } else {
                page.to_string()
            };
            Document { text, filename: filename.to_string(), page_number }
        })
        .collect()
}

fn ingestion_error(path: &Path, message: String) -> RagError {
    RagError::IngestionError { path: path.display().to_string(), message }
}
