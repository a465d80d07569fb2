//! Error types for page access and stylesheet mirroring.
//!
//! None of these are fatal. The reconciler and the host log them and move on
//! to the next element, rule or stylesheet.

use thiserror::Error;

/// Failure reading page geometry for one element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The element was removed from the page after it was registered.
    #[error("element `{0}` is no longer in the document")]
    ElementMissing(String),
    /// A host call failed; the message is whatever the host reported.
    #[error("page call failed: {0}")]
    Host(String),
}

/// Failure while mirroring `:hover` rules into toggle-class rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The stylesheet's rules cannot be read (cross-origin).
    #[error("stylesheet `{0}` is not accessible")]
    InaccessibleSheet(String),
    /// A derived selector was rejected by the selector engine.
    #[error("invalid selector `{0}`")]
    MalformedSelector(String),
    /// The mirrored rule could not be inserted.
    #[error("could not insert rule `{rule}`: {reason}")]
    InsertRejected { rule: String, reason: String },
}
