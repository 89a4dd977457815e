//! Name directory error types.

use crate::gitlab::{ApiError, Catalog};
use thiserror::Error;

/// Errors that can occur while building the name directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// GitLab API error.
    #[error("GitLab API error: {0}")]
    GitLabError(#[from] ApiError),

    /// The listing still returned full pages when the page ceiling was reached.
    #[error(
        "Listing of {catalog} looks truncated: {pages} full pages ({fetched} entries) and more remain"
    )]
    Truncated {
        catalog: Catalog,
        pages: u32,
        fetched: usize,
    },
}
