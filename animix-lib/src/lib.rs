//! # Animix Library
//!
//! This library provides the core of the animix clip mixer: a JSON clip
//! format, mix specifications that combine curves and events from several
//! source clips, an event editing session and constant-tangent
//! post-processing.

pub mod clip;
pub mod constant;
pub mod events;
pub mod mixer;
