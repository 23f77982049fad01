//! Errors raised while creating BEM entities.

/// Errors that can occur when creating or parsing a BEM entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BemError {
    /// An element was requested while no block is open on the stack.
    NoEnclosingBlock,
    /// `create` received a kind other than `block` or `element`.
    UnknownEntityKind(String),
    /// An nth-block-element token asked for a block deeper than the stack.
    AncestorNotFound { depth: usize, token: String },
    /// Raw attributes could not be read from their serialized form.
    InvalidAttributes(String),
}

impl std::fmt::Display for BemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEnclosingBlock => write!(f, "no block context for element has been found"),
            Self::UnknownEntityKind(kind) => write!(f, "unknown BEM entity kind: {}", kind),
            Self::AncestorNotFound { depth, token } => write!(
                f,
                "no block found at depth {} for nth-block-element class '{}'",
                depth, token
            ),
            Self::InvalidAttributes(msg) => write!(f, "invalid attributes: {}", msg),
        }
    }
}

impl std::error::Error for BemError {}
