#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    #[error("Front matter opened with {open_tag:?} is never closed with {close_tag:?}")]
    UnterminatedFrontMatter { open_tag: String, close_tag: String },
}
