use crate::introspect::ValueKind;
use thiserror::Error;

/// Result type alias using PatchPlanError
pub type Result<T> = std::result::Result<T, PatchPlanError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages. Every kind is terminal for the call that produced it:
/// the engine never returns a partial patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Diff
    /// Desired and current values disagree in kind at some path
    ShapeMismatch,
    /// The encoder has no wire arm for a value
    UnsupportedValueKind,

    // Translation
    /// A cross-schema round-trip failed
    Translation,

    // Registry
    UnknownResourceKind,
    InvalidSnapshot,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::ShapeMismatch => "ERR_SHAPE_MISMATCH",
            ExErrorKind::UnsupportedValueKind => "ERR_UNSUPPORTED_VALUE_KIND",
            ExErrorKind::Translation => "ERR_TRANSLATION",
            ExErrorKind::UnknownResourceKind => "ERR_UNKNOWN_RESOURCE_KIND",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus the context needed to locate the defect
/// (operation, patch path, resource kind).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    resource_kind: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            resource_kind: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add patch path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add resource kind context
    pub fn with_resource_kind(mut self, kind: impl Into<String>) -> Self {
        self.resource_kind = Some(kind.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the patch path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the resource kind context, if any
    pub fn resource_kind(&self) -> Option<&str> {
        self.resource_kind.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(kind) = &self.resource_kind {
            write!(f, " (resource_kind: {})", kind)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for diff, encode and translate operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchPlanError {
    /// Both sides are present but classify to different kinds.
    ///
    /// Same-type snapshots never produce this; it signals a broken
    /// `Describe` implementation or a caller mixing resource types.
    #[error("Shape mismatch at '{path}': desired is {desired}, current is {current}")]
    ShapeMismatch {
        path: String,
        desired: ValueKind,
        current: ValueKind,
    },

    /// The encoder cannot represent this value as a wire value
    #[error("Unsupported value kind {kind} at '{path}'")]
    UnsupportedValueKind { kind: String, path: String },

    /// Re-decoding an array under the target schema failed
    #[error("Translation failed at '{path}': {reason}")]
    TranslationError { path: String, reason: String },

    /// No comparison spec is registered under this name
    #[error("Unknown resource kind: {kind}")]
    UnknownResourceKind { kind: String },

    /// A JSON snapshot could not be decoded into the resource type
    #[error("Invalid {side} snapshot for {kind}: {reason}")]
    InvalidSnapshot {
        kind: String,
        side: String,
        reason: String,
    },
}

impl From<PatchPlanError> for ExError {
    fn from(err: PatchPlanError) -> Self {
        let message = err.to_string();
        match err {
            PatchPlanError::ShapeMismatch { path, .. } => ExError::new(ExErrorKind::ShapeMismatch)
                .with_path(path)
                .with_message(message),
            PatchPlanError::UnsupportedValueKind { path, .. } => {
                ExError::new(ExErrorKind::UnsupportedValueKind)
                    .with_path(path)
                    .with_message(message)
            }
            PatchPlanError::TranslationError { path, .. } => ExError::new(ExErrorKind::Translation)
                .with_path(path)
                .with_message(message),
            PatchPlanError::UnknownResourceKind { kind } => {
                ExError::new(ExErrorKind::UnknownResourceKind)
                    .with_resource_kind(kind)
                    .with_message(message)
            }
            PatchPlanError::InvalidSnapshot { kind, .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_resource_kind(kind)
                    .with_message(message)
            }
        }
    }
}

impl From<&PatchPlanError> for ExError {
    fn from(err: &PatchPlanError) -> Self {
        err.clone().into()
    }
}
