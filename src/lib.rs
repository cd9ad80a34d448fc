//! Keywarp is a keyframed affine frame compositor for video transitions.
//!
//! Given two time-aligned frames, keywarp geometrically transforms one
//! (rotation about three axes, shear, translation, optional autoscale) and
//! blends it onto the other according to a time-varying position/size/mix
//! schedule declared as sparse, string-encoded keyframes.
//!
//! # Pipeline overview
//!
//! 1. **Track**: `Properties -> GeometryTrack` (parse the `X,Y:WxH:MIX`
//!    grammar into ordered keyframes; built once, memoized per instance)
//! 2. **Interpolate**: `GeometryTrack + position -> Geometry` (bracketing
//!    scan with ping-pong looping past the nominal range)
//! 3. **Transform**: `TransformParams + elapsed -> AffineMatrix` (3×3
//!    homogeneous compose, rebuilt each frame)
//! 4. **Composite**: inverse-map every destination pixel, sample the packed
//!    4:2:2 secondary frame, blend, and attach a coverage mask
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No fatal conditions in the core**: malformed geometry tokens default,
//!   out-of-order keys are skipped with a diagnostic, unsupported format
//!   pairings pass the primary frame through unchanged.
//! - **Single-threaded composite**: one `process` call fully computes one
//!   output frame; the hosting pipeline owns scheduling.
//!
//! Frame queueing, decode/encode, the producer/consumer graph, and CLI
//! wiring are external collaborators: they supply frames and configuration,
//! and accept the mutated frame plus the emitted coverage mask.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod geometry;
mod render;
mod transform;
mod transition;

pub use config::properties::Properties;
pub use foundation::core::{FrameSpan, Point, Rect};
pub use foundation::error::{KeywarpError, KeywarpResult};
pub use geometry::track::{
    Geometry, GeometryTrack, Keyframe, PixelRect, parse_geometry, parse_value,
};
pub use render::composite::affine_over_in_place;
pub use render::frame::{Frame, Interp, PixelFormat};
pub use transform::affine::{AffineMatrix, TransformParams};
pub use transition::Transition;
