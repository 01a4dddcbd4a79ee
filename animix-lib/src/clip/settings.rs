use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-clip playback settings.
///
/// Only `loop_time` is interpreted; every other field is carried through
/// untouched so a mixed clip inherits its reference clip's template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipSettings {
    #[serde(default)]
    pub loop_time: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
