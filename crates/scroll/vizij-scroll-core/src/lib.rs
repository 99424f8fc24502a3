//! Vizij Scroll Core (engine-agnostic)
//!
//! Scroll-linked showcase logic: a scroll tracker producing a 0–100
//! percentage, a timeline of `[start, end)` segments whose effects pose the
//! scene, a caption fader, and a render loop that ties them to a host's
//! frame callback. Rendering and asset parsing stay with the host (Bevy or
//! the browser).

pub mod captions;
pub mod config;
pub mod error;
pub mod interp;
pub mod load;
pub mod render_loop;
pub mod scene;
pub mod showcase;
pub mod timeline;
pub mod tracker;
pub mod viewport;

// Re-exports for consumers (adapters)
pub use captions::{BucketRule, Caption, CaptionTable};
pub use config::Config;
pub use error::{ConfigError, TimelineError};
pub use interp::{lerp, scale_percent};
pub use load::{LoadEvent, LoadSender, ModelLoad, ModelStatus};
pub use render_loop::{Frame, FrameSink, RenderLoop, ScrollUpdate};
pub use scene::{CameraRig, OrbitControls, SceneState};
pub use showcase::ShowcaseRig;
pub use timeline::{
    Channel, Dispatch, Effect, EffectOp, EntrySpec, Flag, Segment, Timeline, TimelineEntry,
    TimelineSpec,
};
pub use tracker::{ScrollMetrics, ScrollProgress, ScrollTracker};
pub use viewport::{PerspectiveCamera, Viewport};
