use thiserror::Error;

/// Failures scoped to a single wrap-request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {
    /// Nothing asked to be wrapped. Callers treat this as a no-op.
    #[error("no wrap-requests found")]
    MissingWrapRequest,
    #[error("wrapper {wrapper}: target type {target} cannot be resolved")]
    UnresolvedTargetType { wrapper: String, target: String },
    /// Informational only; an empty surface still yields scaffold artifacts.
    #[error("target type {target} has no operations")]
    EmptyOperationSet { target: String },
    #[error("cannot read signature {input:?}: {reason}")]
    InvalidSignature { input: String, reason: String },
    #[error("file pattern {pattern:?} is not usable: {reason}")]
    InvalidFilePattern { pattern: String, reason: String },
    /// Two requests would write the same file; the one discovered first keeps it.
    #[error("wrapper {wrapper}: file {file_id} is already produced by {owner}")]
    DuplicateFileId { wrapper: String, file_id: String, owner: String },
}

impl WrapError {
    pub fn unresolved<W: Into<String>, T: ToString>(wrapper: W, target: T) -> Self {
        WrapError::UnresolvedTargetType { wrapper: wrapper.into(), target: target.to_string() }
    }
    pub(crate) fn signature<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        WrapError::InvalidSignature { input: input.into(), reason: reason.into() }
    }
}
