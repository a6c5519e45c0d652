use crate::foundation::ids::{CollectionId, ElementId};

/// Result alias used throughout the crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Why a variable element could not be bound before generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnboundReason {
    /// The resolver returned nothing for the element.
    Missing,
    /// The resolver returned an empty string.
    Empty,
    /// The value has the wrong shape (e.g. text for an image element).
    KindMismatch,
    /// A counter image was asked for a state it has no image for.
    UnknownState(String),
}

impl std::fmt::Display for UnboundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("no value"),
            Self::Empty => f.write_str("empty value"),
            Self::KindMismatch => f.write_str("value kind does not match element"),
            Self::UnknownState(s) => write!(f, "unknown counter state \"{s}\""),
        }
    }
}

/// One element that failed generation pre-flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnboundValue {
    /// Owning collection.
    pub collection: CollectionId,
    /// Offending element.
    pub element: ElementId,
    /// Element display name, for reporting.
    pub name: String,
    /// Failure reason.
    pub reason: UnboundReason,
}

/// Errors surfaced by the overlay engine.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// Malformed input or a violated model invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Asset (image, folder, font) could not be loaded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Generation pre-flight found variable elements without a usable value.
    #[error("unbound values: {}", format_unbound(.0))]
    Unbound(Vec<UnboundValue>),

    /// Collections whose placement leaves the design canvas; blocks persistence.
    #[error("collections out of canvas bounds: {}", format_ids(.0))]
    OutOfBounds(Vec<CollectionId>),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Snapshot or values (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    /// Any other error with preserved source.
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayoutError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`LayoutError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LayoutError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Element ids reported by an [`LayoutError::Unbound`] error, in report order.
    pub fn unbound_elements(&self) -> Vec<&ElementId> {
        match self {
            Self::Unbound(list) => list.iter().map(|u| &u.element).collect(),
            _ => Vec::new(),
        }
    }
}

fn format_unbound(list: &[UnboundValue]) -> String {
    list.iter()
        .map(|u| {
            format!(
                "{}/{} (\"{}\"): {}",
                u.collection, u.element, u.name, u.reason
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_ids(ids: &[CollectionId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
