//! Merging several source clips into one according to a [`MixSpec`].

mod mix;
pub mod resolver;
mod sink;
pub mod spec;
mod warning;

pub use mix::{compose_path, mix, mix_into, time_scale, MixOutput, MixReport};
pub use resolver::{ClipResolver, FileResolver, InMemoryResolver, ResolveError};
pub use sink::ClipSink;
pub use spec::{ClipRef, MixSpec, SourceEntry, SpecError};
pub use warning::MixWarning;
