//! Message catalog loading from disk.
//!
//! File access goes through `cap_std` so the loader only ever touches the
//! directory holding the configured catalog.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::{CatalogValidationError, MessageCatalog};

/// Errors raised while loading a catalog override.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The path has no file name component.
    #[error("catalog path {path} does not name a file")]
    NotAFile { path: PathBuf },
    /// The file could not be read.
    #[error("failed to read catalog at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was read but is not a valid catalog.
    #[error("invalid catalog at {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: CatalogValidationError,
    },
}

fn read_catalog_text(path: &Path) -> Result<String, CatalogLoadError> {
    let file_name = path.file_name().ok_or_else(|| CatalogLoadError::NotAFile {
        path: path.to_path_buf(),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let read_error = |source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    };
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    directory
        .read_to_string(Path::new(file_name))
        .map_err(read_error)
}

/// Load the catalog at `path`, or the bundled one when no path is set.
///
/// # Errors
///
/// Returns [`CatalogLoadError`] when the file is unreadable or fails
/// validation against `default_language`.
pub fn load_message_catalog(
    path: Option<&Path>,
    default_language: &str,
) -> Result<MessageCatalog, CatalogLoadError> {
    let Some(path) = path else {
        info!(default_language, "using bundled message catalog");
        return MessageCatalog::bundled(default_language).map_err(|source| {
            CatalogLoadError::Invalid {
                path: PathBuf::from("<bundled>"),
                source,
            }
        });
    };

    let text = read_catalog_text(path)?;
    let catalog =
        MessageCatalog::from_json(&text, default_language).map_err(|source| {
            CatalogLoadError::Invalid {
                path: path.to_path_buf(),
                source,
            }
        })?;
    info!(path = %path.display(), default_language, "loaded message catalog");
    Ok(catalog)
}
