use thiserror::Error;

/// Errors returned by a [`RowStore`](super::RowStore).
///
/// The display text is what ends up in user-facing failure notices, so
/// `Rejected` shows the store's own message verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach the store or read its response.
    #[error("Connection to row store failed: {source}")]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    /// The store answered with an error.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The store answered with something that is not a row set.
    #[error("Invalid response from row store: {0}")]
    InvalidResponse(String),

    /// The configured base URL cannot address tables.
    #[error("Invalid store url: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// HTTP-style status of a rejection, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
