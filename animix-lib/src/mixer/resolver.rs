//! Access to source clip data.
//!
//! The mixer never touches clip storage directly; it asks a [`ClipResolver`].
//! Two implementations are provided: [`InMemoryResolver`] for clips already
//! loaded by the caller and [`FileResolver`] for clip files on disk.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::debug;

use crate::clip::{AnimationClip, AnimationEvent, ClipSettings, Curve, CurveBinding};

use super::spec::ClipRef;

/// Why a resolver could not answer for a clip reference.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    NullReference,
    NotFound(String),
    Unsupported(String),
    Load(String),
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullReference => write!(f, "null clip reference"),
            Self::NotFound(what) => write!(f, "clip not found: {}", what),
            Self::Unsupported(what) => write!(f, "unsupported clip reference: {}", what),
            Self::Load(err) => write!(f, "failed to load clip: {}", err),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Read-only view of source clips, supplied by whoever hosts the mixer.
pub trait ClipResolver {
    /// Clip length in seconds.
    fn length(&self, clip: &ClipRef) -> Result<f32, ResolveError>;
    /// Every animated binding of the clip, in clip order.
    fn curve_bindings(&self, clip: &ClipRef) -> Result<Vec<CurveBinding>, ResolveError>;
    fn curve(&self, clip: &ClipRef, binding: &CurveBinding) -> Result<Curve, ResolveError>;
    fn events(&self, clip: &ClipRef) -> Result<Vec<AnimationEvent>, ResolveError>;
    /// Settings template; passed through to the mix output untouched.
    fn clip_settings(&self, clip: &ClipRef) -> Result<ClipSettings, ResolveError>;

    /// Frame rate of the clip. Resolvers without the notion fall back to 60.
    fn frame_rate(&self, _clip: &ClipRef) -> Result<f32, ResolveError> {
        Ok(crate::clip::DEFAULT_FRAME_RATE)
    }
}

fn curve_of(clip: &AnimationClip, binding: &CurveBinding) -> Result<Curve, ResolveError> {
    clip.curves
        .get(binding)
        .cloned()
        .ok_or_else(|| ResolveError::NotFound(format!("{} in {}", binding, clip.name)))
}

/// Resolver over clips held in memory, keyed by reference.
#[derive(Debug, Default)]
pub struct InMemoryResolver {
    clips: HashMap<ClipRef, AnimationClip>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, clip_ref: ClipRef, clip: AnimationClip) {
        self.clips.insert(clip_ref, clip);
    }

    /// Builder-style insert under a path reference.
    pub fn with_clip(mut self, path: impl Into<String>, clip: AnimationClip) -> Self {
        self.insert(ClipRef::Path(path.into()), clip);
        self
    }

    fn get(&self, clip: &ClipRef) -> Result<&AnimationClip, ResolveError> {
        if clip.is_null() {
            return Err(ResolveError::NullReference);
        }
        self.clips
            .get(clip)
            .ok_or_else(|| ResolveError::NotFound(clip.to_string()))
    }
}

impl ClipResolver for InMemoryResolver {
    fn length(&self, clip: &ClipRef) -> Result<f32, ResolveError> {
        Ok(self.get(clip)?.length())
    }

    fn curve_bindings(&self, clip: &ClipRef) -> Result<Vec<CurveBinding>, ResolveError> {
        Ok(self.get(clip)?.curves.keys().cloned().collect())
    }

    fn curve(&self, clip: &ClipRef, binding: &CurveBinding) -> Result<Curve, ResolveError> {
        curve_of(self.get(clip)?, binding)
    }

    fn events(&self, clip: &ClipRef) -> Result<Vec<AnimationEvent>, ResolveError> {
        Ok(self.get(clip)?.events.clone())
    }

    fn clip_settings(&self, clip: &ClipRef) -> Result<ClipSettings, ResolveError> {
        Ok(self.get(clip)?.settings.clone())
    }

    fn frame_rate(&self, clip: &ClipRef) -> Result<f32, ResolveError> {
        Ok(self.get(clip)?.frame_rate)
    }
}

/// Resolver reading clip files relative to a base directory.
///
/// Path references are joined onto the base directory (absolute paths are
/// used as-is). Asset references are looked up by guid in an optional asset
/// index. Host instance references cannot be resolved from disk.
///
/// Parsed clips are cached for the lifetime of the resolver.
#[derive(Debug)]
pub struct FileResolver {
    base_dir: PathBuf,
    asset_index: HashMap<String, PathBuf>,
    cache: RefCell<HashMap<PathBuf, Rc<AnimationClip>>>,
}

impl FileResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            asset_index: HashMap::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Register guid → path mappings used for asset references.
    pub fn with_asset_index(mut self, index: HashMap<String, PathBuf>) -> Self {
        self.asset_index = index;
        self
    }

    /// Load an asset index file: a JSON object mapping guids to clip paths.
    pub fn load_asset_index(path: impl AsRef<Path>) -> Result<HashMap<String, PathBuf>, ResolveError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ResolveError::Load(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| ResolveError::Load(format!("{}: {}", path.display(), e)))
    }

    fn locate(&self, clip: &ClipRef) -> Result<PathBuf, ResolveError> {
        if clip.is_null() {
            return Err(ResolveError::NullReference);
        }
        let relative = match clip {
            ClipRef::Path(path) => PathBuf::from(path),
            ClipRef::Asset { guid, .. } => self
                .asset_index
                .get(guid)
                .cloned()
                .ok_or_else(|| ResolveError::NotFound(format!("asset guid {}", guid)))?,
            ClipRef::Instance { .. } => return Err(ResolveError::Unsupported(clip.to_string())),
        };
        Ok(self.base_dir.join(relative))
    }

    fn load(&self, clip: &ClipRef) -> Result<Rc<AnimationClip>, ResolveError> {
        let path = self.locate(clip)?;
        if let Some(cached) = self.cache.borrow().get(&path) {
            return Ok(Rc::clone(cached));
        }

        if !path.is_file() {
            return Err(ResolveError::NotFound(path.display().to_string()));
        }

        debug!("Loading clip {}", path.display());
        let mut loaded = AnimationClip::load(&path)
            .map_err(|e| ResolveError::Load(format!("{}: {}", path.display(), e)))?;
        if loaded.name.is_empty() {
            loaded.name = clip_name_from_path(&path);
        }

        let loaded = Rc::new(loaded);
        self.cache.borrow_mut().insert(path, Rc::clone(&loaded));
        Ok(loaded)
    }
}

/// File name without any extension: `walk.clip.json` → `walk`.
pub fn clip_name_from_path(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.split('.').next().unwrap_or(name).to_string())
        .unwrap_or_default()
}

impl ClipResolver for FileResolver {
    fn length(&self, clip: &ClipRef) -> Result<f32, ResolveError> {
        Ok(self.load(clip)?.length())
    }

    fn curve_bindings(&self, clip: &ClipRef) -> Result<Vec<CurveBinding>, ResolveError> {
        Ok(self.load(clip)?.curves.keys().cloned().collect())
    }

    fn curve(&self, clip: &ClipRef, binding: &CurveBinding) -> Result<Curve, ResolveError> {
        let loaded = self.load(clip)?;
        curve_of(&loaded, binding)
    }

    fn events(&self, clip: &ClipRef) -> Result<Vec<AnimationEvent>, ResolveError> {
        Ok(self.load(clip)?.events.clone())
    }

    fn clip_settings(&self, clip: &ClipRef) -> Result<ClipSettings, ResolveError> {
        Ok(self.load(clip)?.settings.clone())
    }

    fn frame_rate(&self, clip: &ClipRef) -> Result<f32, ResolveError> {
        Ok(self.load(clip)?.frame_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> AnimationClip {
        let mut clip = AnimationClip::new("Idle");
        clip.insert_curve(
            CurveBinding::new("Root", "posY"),
            Curve::from_points(&[(0.0, 0.0), (1.5, 0.2)]),
        );
        clip.events.push(AnimationEvent::new(0.5, "Blink"));
        clip
    }

    #[test]
    fn in_memory_resolver_answers_every_query() {
        let resolver = InMemoryResolver::new().with_clip("idle", clip());
        let clip_ref = ClipRef::Path("idle".to_string());
        assert_eq!(resolver.length(&clip_ref), Ok(1.5));
        let bindings = resolver.curve_bindings(&clip_ref).expect("bindings");
        assert_eq!(bindings, vec![CurveBinding::new("Root", "posY")]);
        assert_eq!(resolver.curve(&clip_ref, &bindings[0]).expect("curve").len(), 2);
        assert_eq!(resolver.events(&clip_ref).expect("events").len(), 1);
        assert!(!resolver.clip_settings(&clip_ref).expect("settings").loop_time);
    }

    #[test]
    fn in_memory_resolver_reports_missing_and_null() {
        let resolver = InMemoryResolver::new();
        assert!(matches!(
            resolver.length(&ClipRef::Path("missing".to_string())),
            Err(ResolveError::NotFound(_))
        ));
        assert_eq!(
            resolver.length(&ClipRef::Instance { instance_id: 0 }),
            Err(ResolveError::NullReference)
        );
    }

    #[test]
    fn clip_names_drop_every_extension() {
        assert_eq!(clip_name_from_path(Path::new("a/b/walk.clip.json")), "walk");
        assert_eq!(clip_name_from_path(Path::new("run.json")), "run");
    }

    #[test]
    fn file_resolver_loads_curves_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut unnamed = clip();
        unnamed.name.clear();
        unnamed.save(dir.path().join("idle.clip.json")).expect("save clip");

        let resolver = FileResolver::new(dir.path());
        assert_eq!(resolver.base_dir(), dir.path());
        let clip_ref = ClipRef::Path("idle.clip.json".to_string());
        let bindings = resolver.curve_bindings(&clip_ref).expect("bindings");
        let curve = resolver.curve(&clip_ref, &bindings[0]).expect("curve");
        assert_eq!(curve.duration(), 1.5);
        assert_eq!(
            resolver.curve(&clip_ref, &CurveBinding::new("Root", "missing")),
            Err(ResolveError::NotFound("Root:missing in idle".to_string()))
        );
    }

    #[test]
    fn file_resolver_rejects_instance_references() {
        let resolver = FileResolver::new(".");
        assert!(matches!(
            resolver.length(&ClipRef::Instance { instance_id: 12 }),
            Err(ResolveError::Unsupported(_))
        ));
        assert!(matches!(
            resolver.length(&ClipRef::Asset {
                guid: "feed".to_string(),
                file_id: 0
            }),
            Err(ResolveError::NotFound(_))
        ));
    }
}
