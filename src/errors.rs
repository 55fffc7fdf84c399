use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeSelectError {
    /// Raised only by the opt-in eager validation; the builder itself keeps
    /// the documented last-write-wins behavior for duplicates.
    #[error("Duplicate node value in forest: {value}")]
    DuplicateValue { value: String },
}

pub type TreeSelectResult<T> = Result<T, TreeSelectError>;
