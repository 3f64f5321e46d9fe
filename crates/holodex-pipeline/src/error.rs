use holodex_source::SourceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("gave up after {max_pages} pages without reaching the end of the collection")]
    PageLimit { max_pages: u32 },

    #[error("enrichment barrier failed: {0}")]
    Join(String),
}
