//! Animation clip model and its JSON file format.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod curve;
mod event;
mod settings;

pub use curve::{Curve, CurveBinding, Keyframe, TangentMode};
pub use event::{AnimationEvent, MessageOptions};
pub use settings::ClipSettings;

pub const DEFAULT_FRAME_RATE: f32 = 60.0;

/// Error type for reading and writing clip files.
#[derive(Debug)]
pub enum ClipFileError {
    Io(std::io::Error),
    Parse {
        message: String,
        line: usize,
        column: usize,
    },
    DuplicateBinding {
        path: String,
        property: String,
    },
    Serialize(String),
}

impl Display for ClipFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Parse {
                message,
                line,
                column,
            } => write!(
                f,
                "failed to parse clip at line {} column {}: {}",
                line, column, message
            ),
            Self::DuplicateBinding { path, property } => {
                write!(f, "duplicate curve binding {:?} / {:?}", path, property)
            }
            Self::Serialize(err) => write!(f, "failed to serialize clip: {}", err),
        }
    }
}

impl std::error::Error for ClipFileError {}

impl From<std::io::Error> for ClipFileError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// A named set of keyframe curves plus a discrete event list.
///
/// Curves keep the order in which their bindings were first inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub frame_rate: f32,
    pub settings: ClipSettings,
    pub curves: IndexMap<CurveBinding, Curve>,
    pub events: Vec<AnimationEvent>,
}

impl Default for AnimationClip {
    fn default() -> Self {
        Self {
            name: String::new(),
            frame_rate: DEFAULT_FRAME_RATE,
            settings: ClipSettings::default(),
            curves: IndexMap::new(),
            events: Vec::new(),
        }
    }
}

/// On-disk layout of a clip. Curves are stored as a list to keep files readable.
#[derive(Debug, Serialize, Deserialize)]
struct ClipFile {
    #[serde(default)]
    name: String,
    #[serde(default = "default_frame_rate")]
    frame_rate: f32,
    #[serde(default)]
    settings: ClipSettings,
    #[serde(default)]
    curves: Vec<CurveEntry>,
    #[serde(default)]
    events: Vec<AnimationEvent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CurveEntry {
    path: String,
    property: String,
    #[serde(default)]
    keys: Curve,
}

fn default_frame_rate() -> f32 {
    DEFAULT_FRAME_RATE
}

impl AnimationClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Clip length in seconds: the end of the longest curve.
    pub fn length(&self) -> f32 {
        self.curves
            .values()
            .map(Curve::duration)
            .fold(0.0_f32, f32::max)
    }

    /// Insert or replace the curve for `binding`.
    ///
    /// # Returns
    /// The curve previously stored under the same binding, if any.
    pub fn insert_curve(&mut self, binding: CurveBinding, curve: Curve) -> Option<Curve> {
        self.curves.insert(binding, curve)
    }

    pub fn curve(&self, path: &str, property: &str) -> Option<&Curve> {
        self.curves.get(&CurveBinding::new(path, property))
    }

    /// Parse a clip from its JSON representation.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or declares the same binding twice.
    pub fn from_json_str(json: &str) -> Result<Self, ClipFileError> {
        let file: ClipFile = serde_json::from_str(json).map_err(|e| ClipFileError::Parse {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        })?;

        let mut curves = IndexMap::with_capacity(file.curves.len());
        for entry in file.curves {
            let binding = CurveBinding::new(entry.path, entry.property);
            if curves.contains_key(&binding) {
                return Err(ClipFileError::DuplicateBinding {
                    path: binding.path,
                    property: binding.property,
                });
            }
            curves.insert(binding, entry.keys);
        }

        Ok(Self {
            name: file.name,
            frame_rate: file.frame_rate,
            settings: file.settings,
            curves,
            events: file.events,
        })
    }

    fn to_file(&self) -> ClipFile {
        ClipFile {
            name: self.name.clone(),
            frame_rate: self.frame_rate,
            settings: self.settings.clone(),
            curves: self
                .curves
                .iter()
                .map(|(binding, curve)| CurveEntry {
                    path: binding.path.clone(),
                    property: binding.property.clone(),
                    keys: curve.clone(),
                })
                .collect(),
            events: self.events.clone(),
        }
    }

    /// Serialize the clip as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ClipFileError> {
        serde_json::to_string_pretty(&self.to_file())
            .map_err(|e| ClipFileError::Serialize(e.to_string()))
    }

    /// Serialize the clip as single-line JSON.
    pub fn to_json_string_compact(&self) -> Result<String, ClipFileError> {
        serde_json::to_string(&self.to_file()).map_err(|e| ClipFileError::Serialize(e.to_string()))
    }

    /// Read a clip file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClipFileError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Write the clip to disk as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ClipFileError> {
        self.save_as(path, true)
    }

    /// Write the clip to disk, pretty-printed or compact.
    pub fn save_as(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), ClipFileError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = if pretty {
            self.to_json_string()?
        } else {
            self.to_json_string_compact()?
        };
        fs::write(path, json)?;
        Ok(())
    }
}
