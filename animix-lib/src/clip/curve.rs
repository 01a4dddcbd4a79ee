//! Keyframe curves and the bindings that address them.

use serde::{Deserialize, Serialize};

/// How a keyframe tangent is interpreted on either side of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TangentMode {
    #[default]
    Free,
    Auto,
    ClampedAuto,
    Linear,
    Constant,
}

fn is_free(mode: &TangentMode) -> bool {
    *mode == TangentMode::Free
}

/// A single `(time, value)` sample with tangent metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
    #[serde(default, skip_serializing_if = "is_free")]
    pub in_mode: TangentMode,
    #[serde(default, skip_serializing_if = "is_free")]
    pub out_mode: TangentMode,
}

impl Keyframe {
    /// Create a keyframe with flat, free tangents.
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
            in_mode: TangentMode::Free,
            out_mode: TangentMode::Free,
        }
    }

    /// Set both tangent slopes.
    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// Addresses one animated property: an object path plus a property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurveBinding {
    pub path: String,
    pub property: String,
}

impl CurveBinding {
    pub fn new(path: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            property: property.into(),
        }
    }

    /// The `"{path}/{property}"` string that source filters are matched against.
    pub fn filter_key(&self) -> String {
        format!("{}/{}", self.path, self.property)
    }
}

impl std::fmt::Display for CurveBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.path, self.property)
    }
}

/// Ordered keyframe sequence for a single property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    pub keys: Vec<Keyframe>,
}

impl Curve {
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self { keys }
    }

    /// Build a curve from `(time, value)` pairs with flat tangents.
    pub fn from_points(points: &[(f32, f32)]) -> Self {
        Self {
            keys: points
                .iter()
                .map(|&(time, value)| Keyframe::new(time, value))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Time of the last key, or zero for an empty curve.
    pub fn duration(&self) -> f32 {
        self.keys.last().map(|key| key.time).unwrap_or(0.0)
    }

    /// Multiply every key time by `factor`. Values and tangents are left as-is.
    pub fn scale_time(&mut self, factor: f32) {
        for key in &mut self.keys {
            key.time *= factor;
        }
    }

    /// True when every key holds the same value as the first one.
    pub fn is_flat(&self) -> bool {
        match self.keys.first() {
            None => true,
            Some(first) => self.keys[1..].iter().all(|key| key.value == first.value),
        }
    }

    /// Switch both tangents of every key to [`TangentMode::Constant`].
    pub fn set_constant(&mut self) {
        for key in &mut self.keys {
            key.in_mode = TangentMode::Constant;
            key.out_mode = TangentMode::Constant;
        }
    }
}
