//! Keyframed placement geometry.
//!
//! A transition's placement schedule is declared as sparse, string-encoded
//! keyframes with the grammar `X,Y:WxH:MIX`. Any numeric field may carry a
//! `%` suffix, meaning a percentage of the normalization dimension for that
//! axis; any omitted field inherits the previous keyframe's resolved value.
//! [`GeometryTrack::build`] turns a configuration bag into an ordered track,
//! and [`GeometryTrack::interpolate`] resolves an arbitrary normalized
//! position into a concrete [`Geometry`].

use kurbo::Rect;

use crate::config::properties::Properties;
use crate::foundation::core::FrameSpan;
use crate::foundation::error::{KeywarpError, KeywarpResult};
use crate::foundation::math::{parse_f64_prefix, parse_i64_prefix};

/// A placement rectangle plus blend weight, with the normalization
/// dimensions its percentage values were resolved against.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Geometry {
    /// Horizontal offset, in normalized-space pixels.
    pub x: f32,
    /// Vertical offset, in normalized-space pixels.
    pub y: f32,
    /// Width, in normalized-space pixels.
    pub w: f32,
    /// Height, in normalized-space pixels.
    pub h: f32,
    /// Blend weight in `[0, 100]`.
    pub mix: f32,
    /// Normalization width used to resolve `%` values for x/w.
    pub norm_w: i32,
    /// Normalization height used to resolve `%` values for y/h.
    pub norm_h: i32,
}

impl Geometry {
    /// The geometry used when no prior keyframe exists: zero offset,
    /// full-frame size, full mix.
    pub fn frame_default(norm_w: i32, norm_h: i32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: norm_w as f32,
            h: norm_h as f32,
            mix: 100.0,
            norm_w,
            norm_h,
        }
    }

    /// The placement rectangle in normalized space.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x + self.w),
            f64::from(self.y + self.h),
        )
    }

    /// Convert to absolute pixel space for a frame of `width` × `height`.
    ///
    /// Width and x are aligned down to even values so the placement respects
    /// 4:2:2 chroma pair boundaries.
    pub fn to_pixel(&self, width: u32, height: u32) -> PixelRect {
        let mut x = (self.x * width as f32 / self.norm_w as f32) as i32;
        let y = (self.y * height as f32 / self.norm_h as f32) as i32;
        let mut w = (self.w * width as f32 / self.norm_w as f32) as i32;
        let h = (self.h * height as f32 / self.norm_h as f32) as i32;
        w -= w.abs() % 2;
        x -= x.abs() % 2;
        PixelRect { x, y, w, h }
    }
}

/// An absolute pixel-space placement rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

/// One interpolation control point of a [`GeometryTrack`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Frame offset this key was declared at, relative to the span's
    /// in-point (negative offsets were counted back from the out-point).
    pub frame: i32,
    /// Position normalized to the span, strictly increasing along the track.
    pub position: f32,
    /// Target geometry at `position`.
    pub geometry: Geometry,
}

/// Parse one numeric field of a geometry string.
///
/// Returns the parsed value and the unconsumed remainder. A malformed
/// leading token yields `default` silently. A `%` suffix scales the value by
/// `norm / 100`. Trailing `delim` and `%` characters are consumed
/// permissively so a following field starts clean.
pub fn parse_value(input: &str, norm: i32, delim: char, default: f32) -> (f32, &str) {
    let (value, rest) = match parse_f64_prefix(input) {
        Some((parsed, rest)) => {
            if rest.starts_with('%') {
                ((parsed / 100.0 * f64::from(norm)) as f32, rest)
            } else {
                (parsed as f32, rest)
            }
        }
        None => (default, input),
    };
    let rest = rest.trim_start_matches(|c: char| c == delim || c == '%');
    (value, rest)
}

/// Parse a geometry string with the grammar `X,Y:WxH:MIX`.
///
/// Omitted fields inherit from `defaults`, or from
/// [`Geometry::frame_default`] when no prior keyframe exists. An empty
/// string inherits entirely.
pub fn parse_geometry(
    spec: &str,
    defaults: Option<&Geometry>,
    norm_w: i32,
    norm_h: i32,
) -> Geometry {
    let base = match defaults {
        Some(defaults) => Geometry {
            norm_w,
            norm_h,
            ..*defaults
        },
        None => Geometry::frame_default(norm_w, norm_h),
    };

    if spec.is_empty() {
        return base;
    }

    let (x, rest) = parse_value(spec, norm_w, ',', base.x);
    let (y, rest) = parse_value(rest, norm_h, ':', base.y);
    let (w, rest) = parse_value(rest, norm_w, 'x', base.w);
    let (h, rest) = parse_value(rest, norm_h, ':', base.h);
    let (mix, _) = parse_value(rest, 100, ' ', base.mix);

    Geometry {
        x,
        y,
        w,
        h,
        mix,
        norm_w,
        norm_h,
    }
}

/// Ordered keyframe sequence for one transition instance.
///
/// Always holds at least the synthetic start and end keyframes. Built once
/// per instance and memoized by the owning transition.
#[derive(Clone, Debug, serde::Serialize)]
pub struct GeometryTrack {
    keys: Vec<Keyframe>,
}

impl GeometryTrack {
    /// Build a track from a configuration bag.
    ///
    /// Reads the `start` geometry (anchored at position 0), then every
    /// `key[<offset>]` entry in declaration order, then the `end` geometry.
    /// A non-negative offset counts forward from the in-point; a negative
    /// offset counts backward from the out-point. A key whose computed
    /// position is not strictly greater than the previously accepted key's
    /// is skipped with a diagnostic; it never corrupts the sequence.
    pub fn build(properties: &Properties, span: FrameSpan, norm_w: i32, norm_h: i32) -> Self {
        let start = parse_geometry(properties.get("start").unwrap_or(""), None, norm_w, norm_h);
        let mut keys = vec![Keyframe {
            frame: 0,
            position: 0.0,
            geometry: start,
        }];

        let len = span.out_point - span.in_point;
        let duration = span.duration() as f32;

        for (name, value) in properties.iter() {
            let Some(offset) = name.strip_prefix("key[") else {
                continue;
            };
            let frame = parse_i64_prefix(offset).map_or(0, |(frame, _)| frame) as i32;

            let position = if frame >= 0 && frame < len {
                frame as f32 / duration
            } else if frame < 0 && -frame < len {
                (len + frame) as f32 / duration
            } else {
                0.0
            };

            let prev = keys[keys.len() - 1];
            if position <= prev.position {
                tracing::warn!(key = name, "geometry key out of order, skipping");
                continue;
            }

            let geometry = parse_geometry(value, Some(&prev.geometry), norm_w, norm_h);
            keys.push(Keyframe {
                frame,
                position,
                geometry,
            });
        }

        let prev = keys[keys.len() - 1];
        let end = parse_geometry(
            properties.get("end").unwrap_or(""),
            Some(&prev.geometry),
            norm_w,
            norm_h,
        );
        let position = if span.out_point > 0 {
            len as f32 / duration
        } else {
            1.0
        };
        keys.push(Keyframe {
            frame: len,
            position,
            geometry: end,
        });

        Self { keys }
    }

    /// Build a track from explicit keyframes.
    ///
    /// The track must hold at least the start and end keyframes, with
    /// strictly increasing positions.
    pub fn from_keys(keys: Vec<Keyframe>) -> KeywarpResult<Self> {
        if keys.len() < 2 {
            return Err(KeywarpError::geometry(
                "a track needs at least start and end keyframes",
            ));
        }
        if !keys.windows(2).all(|w| w[0].position < w[1].position) {
            return Err(KeywarpError::geometry(
                "keyframe positions must be strictly increasing",
            ));
        }
        Ok(Self { keys })
    }

    /// The keyframes, in position order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Resolve `position` into a concrete geometry.
    ///
    /// Positions at or past 1 are remapped into a triangle wave, so a track
    /// queried beyond its nominal range ping-pongs instead of clamping. The
    /// bracketing pair is found by linear scan (tracks hold tens of keys at
    /// most). When the bracketing keyframes are exactly one source frame
    /// apart the out keyframe is used verbatim, avoiding sub-pixel jitter on
    /// single-frame spans.
    pub fn interpolate(&self, position: f32) -> Geometry {
        let mut position = position;
        if position >= 1.0 {
            let section = position.floor();
            position -= section;
            if (section as i64) % 2 == 1 {
                position = 1.0 - position;
            }
        }

        let mut idx = 0;
        while idx + 2 < self.keys.len() {
            let (a, b) = (self.keys[idx], self.keys[idx + 1]);
            if position >= a.position && position < b.position {
                break;
            }
            idx += 1;
        }
        let a = self.keys[idx];
        let b = self.keys[idx + 1];

        if a.frame == b.frame - 1 || b.position <= a.position {
            return b.geometry;
        }

        let t = (position - a.position) / (b.position - a.position);
        Geometry {
            x: a.geometry.x + (b.geometry.x - a.geometry.x) * t,
            y: a.geometry.y + (b.geometry.y - a.geometry.y) * t,
            w: a.geometry.w + (b.geometry.w - a.geometry.w) * t,
            h: a.geometry.h + (b.geometry.h - a.geometry.h) * t,
            mix: a.geometry.mix + (b.geometry.mix - a.geometry.mix) * t,
            norm_w: a.geometry.norm_w,
            norm_h: a.geometry.norm_h,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/track.rs"]
mod tests;
