use std::fmt::{Display, Formatter};

use super::resolver::ResolveError;

/// A per-source problem that was recovered from during a mix.
///
/// `index` is the position of the source in the spec's `Animations` list.
#[derive(Debug, Clone, PartialEq)]
pub enum MixWarning {
    /// The source had no clip reference and was skipped.
    NullSource { index: usize },
    /// The resolver could not answer for the source; it was skipped.
    Unresolved { index: usize, reason: ResolveError },
    /// The filter did not compile; the source's curves were dropped.
    InvalidFilter {
        index: usize,
        pattern: String,
        reason: String,
    },
}

impl MixWarning {
    pub fn index(&self) -> usize {
        match self {
            Self::NullSource { index }
            | Self::Unresolved { index, .. }
            | Self::InvalidFilter { index, .. } => *index,
        }
    }
}

impl Display for MixWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullSource { index } => write!(f, "source {} has no clip, skipped", index),
            Self::Unresolved { index, reason } => {
                write!(f, "source {} could not be resolved, skipped: {}", index, reason)
            }
            Self::InvalidFilter {
                index,
                pattern,
                reason,
            } => write!(
                f,
                "source {} has an invalid filter {:?}, curves skipped: {}",
                index, pattern, reason
            ),
        }
    }
}
