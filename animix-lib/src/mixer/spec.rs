//! Persisted mix specification (`*.mix.json` files).
//!
//! Field names follow the format written by existing authoring tools:
//! `Loop`, `Animations`, and per entry `Animation`, `Filter`, `Path`,
//! `MatchTime`, `CopyEvents`. Missing fields take their defaults, so `{}`
//! is a valid empty spec.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

/// Error type for reading and writing mix specifications.
#[derive(Debug)]
pub enum SpecError {
    Io(std::io::Error),
    Parse {
        message: String,
        line: usize,
        column: usize,
    },
    Serialize(String),
}

impl Display for SpecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Parse {
                message,
                line,
                column,
            } => write!(
                f,
                "failed to parse mix spec at line {} column {}: {}",
                line, column, message
            ),
            Self::Serialize(err) => write!(f, "failed to serialize mix spec: {}", err),
        }
    }
}

impl std::error::Error for SpecError {}

impl From<std::io::Error> for SpecError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Reference to a source clip.
///
/// Accepts a plain path string, an asset reference `{"guid": .., "fileID": ..}`
/// or a host instance reference `{"instanceID": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClipRef {
    Path(String),
    Asset {
        guid: String,
        #[serde(rename = "fileID", default)]
        file_id: i64,
    },
    Instance {
        #[serde(rename = "instanceID")]
        instance_id: i64,
    },
}

impl ClipRef {
    /// Empty paths and `instanceID == 0` are how hosts encode "no clip".
    pub fn is_null(&self) -> bool {
        match self {
            ClipRef::Path(path) => path.trim().is_empty(),
            ClipRef::Asset { guid, .. } => guid.trim().is_empty(),
            ClipRef::Instance { instance_id } => *instance_id == 0,
        }
    }
}

impl Display for ClipRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipRef::Path(path) => write!(f, "{}", path),
            ClipRef::Asset { guid, file_id } => write!(f, "guid:{}#{}", guid, file_id),
            ClipRef::Instance { instance_id } => write!(f, "instance:{}", instance_id),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One source clip and how its curves and events enter the mix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceEntry {
    #[serde(rename = "Animation")]
    pub clip: Option<ClipRef>,
    #[serde(rename = "Filter", deserialize_with = "null_as_default")]
    pub filter: String,
    #[serde(rename = "Path", deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(rename = "MatchTime")]
    pub match_time: bool,
    #[serde(rename = "CopyEvents")]
    pub copy_events: bool,
}

impl SourceEntry {
    pub fn new(clip: ClipRef) -> Self {
        Self {
            clip: Some(clip),
            ..Self::default()
        }
    }

    /// The clip reference, unless it is absent or null.
    pub fn clip_ref(&self) -> Option<&ClipRef> {
        self.clip.as_ref().filter(|clip| !clip.is_null())
    }

    /// The filter pattern, unless it is empty.
    pub fn filter_pattern(&self) -> Option<&str> {
        if self.filter.is_empty() {
            None
        } else {
            Some(self.filter.as_str())
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_match_time(mut self, match_time: bool) -> Self {
        self.match_time = match_time;
        self
    }

    pub fn with_copy_events(mut self, copy_events: bool) -> Self {
        self.copy_events = copy_events;
        self
    }
}

/// Declarative description of a mix: loop flag plus ordered sources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MixSpec {
    #[serde(rename = "Loop")]
    pub looping: bool,
    #[serde(rename = "Animations", deserialize_with = "null_as_default")]
    pub sources: Vec<SourceEntry>,
}

impl MixSpec {
    pub fn new(looping: bool, sources: Vec<SourceEntry>) -> Self {
        Self { looping, sources }
    }

    /// Parse a spec from JSON text.
    ///
    /// # Errors
    /// Returns [`SpecError::Parse`] with the failing position for malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, SpecError> {
        serde_json::from_str(json).map_err(|e| SpecError::Parse {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        })
    }

    /// Serialize the spec as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SpecError> {
        serde_json::to_string_pretty(self).map_err(|e| SpecError::Serialize(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SpecError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// A small spec showing every field, used as a starting template.
    pub fn example() -> Self {
        Self {
            looping: true,
            sources: vec![
                SourceEntry::new(ClipRef::Path("clips/walk.clip.json".to_string()))
                    .with_copy_events(true),
                SourceEntry::new(ClipRef::Path("clips/wave.clip.json".to_string()))
                    .with_filter("^Spine/RightArm")
                    .with_match_time(true),
            ],
        }
    }
}
