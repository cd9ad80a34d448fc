//! The affine transition instance.
//!
//! A [`Transition`] owns the configuration bag and the clip span, memoizes
//! the geometry track built from them, and drives one composite per frame:
//! interpolate the geometry, convert it to pixel space, build the per-frame
//! matrix, run the pixel loop.

use crate::config::properties::Properties;
use crate::foundation::core::FrameSpan;
use crate::foundation::error::KeywarpResult;
use crate::geometry::track::{Geometry, GeometryTrack};
use crate::render::composite::affine_over_in_place;
use crate::render::frame::{Frame, Interp};
use crate::transform::affine::{AffineMatrix, TransformParams};

/// Default placement when the configuration declares no `start` geometry.
const DEFAULT_START: &str = "0,0:100%x100%";

/// One affine transition instance.
///
/// The geometry track is parsed lazily on the first frame and cached for the
/// instance's lifetime; reconfiguring requires constructing a new instance.
/// Calls are synchronous and single-threaded: one [`Transition::process`]
/// call fully computes one output frame before returning.
#[derive(Clone, Debug)]
pub struct Transition {
    properties: Properties,
    span: FrameSpan,
    track: Option<GeometryTrack>,
}

impl Transition {
    /// Create an instance over `[in_point, out_point]` (inclusive).
    ///
    /// When the configuration does not declare a `start` geometry, the
    /// full-frame default is applied.
    pub fn new(mut properties: Properties, in_point: i32, out_point: i32) -> KeywarpResult<Self> {
        let span = FrameSpan::new(in_point, out_point)?;
        if !properties.contains("start") {
            properties.set("start", DEFAULT_START);
        }
        Ok(Self {
            properties,
            span,
            track: None,
        })
    }

    /// The clip span this instance animates over.
    pub fn span(&self) -> FrameSpan {
        self.span
    }

    /// The instance's configuration.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Interpolated geometry at an absolute frame `position`, in normalized
    /// space.
    ///
    /// Builds and caches the geometry track on first use, resolving
    /// percentage values against `norm_w` × `norm_h`.
    pub fn geometry_at(&mut self, position: i32, norm_w: i32, norm_h: i32) -> Geometry {
        let progress = self.span.progress(position);
        let track = self.track.get_or_insert_with(|| {
            GeometryTrack::build(&self.properties, self.span, norm_w, norm_h)
        });
        track.interpolate(progress)
    }

    /// Composite one frame: transform `b` and blend it onto `a` in place.
    ///
    /// `a` is the primary frame being mutated; `b` is the secondary frame
    /// being transformed in. The secondary frame is expected to arrive
    /// already scaled to the placement size; its actual dimensions govern
    /// the source bounds. Sampling hints are propagated onto `b` (a primary
    /// with no rescale request maps to nearest), together with the
    /// configuration's `distort` hint. On completion `a` holds the
    /// composite and `b` carries the generated coverage mask.
    #[tracing::instrument(skip(self, a, b))]
    pub fn process(&mut self, a: &mut Frame, b: &mut Frame, position: i32) -> KeywarpResult<()> {
        let geometry = self.geometry_at(position, a.norm_width() as i32, a.norm_height() as i32);
        let mut placement = geometry.to_pixel(a.width(), a.height());

        b.set_interp(match a.interp() {
            Interp::None => Interp::Nearest,
            hint => hint,
        });
        b.set_distort(self.properties.get_i64("distort") != 0);

        placement.w = b.width() as i32;
        placement.h = b.height() as i32;

        let params = TransformParams::from_properties(&self.properties);
        let matrix = AffineMatrix::from_params(&params, self.span.elapsed(position));
        affine_over_in_place(a, b, placement, &matrix)
    }
}

#[cfg(test)]
#[path = "../tests/unit/transition.rs"]
mod tests;
