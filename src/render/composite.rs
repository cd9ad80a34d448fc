//! The inverse-mapping pixel loop.
//!
//! For every destination pixel of the primary frame, the loop maps the
//! pixel's position (relative to the placement center) through the transform
//! to fractional source coordinates, truncates, and samples the secondary
//! frame when the sample is in bounds. Sampling is nearest-neighbor
//! regardless of the frames' quality hints.

use crate::foundation::error::KeywarpResult;
use crate::geometry::track::PixelRect;
use crate::render::frame::{Frame, PixelFormat};
use crate::transform::affine::AffineMatrix;

/// Transform the secondary frame through `matrix` and blend it onto the
/// primary frame in place.
///
/// `placement` positions the secondary frame on the primary: its origin is
/// used for centering, while its size is taken from the secondary frame
/// itself. When the secondary frame carries an alpha mask, each sample is
/// blended by `alpha/255`; otherwise in-bounds samples overwrite the
/// destination. A fresh coverage mask (one byte per secondary-frame pixel,
/// 255 where a sample landed, the sampled alpha when present) is attached to
/// the secondary frame, superseding any prior mask.
///
/// Any pixel format pairing other than 4:2:2/4:2:2 performs no pixel work:
/// the primary frame is returned unmodified. That is an expected
/// degradation, not an error.
pub fn affine_over_in_place(
    a: &mut Frame,
    b: &mut Frame,
    placement: PixelRect,
    matrix: &AffineMatrix,
) -> KeywarpResult<()> {
    if a.format() != PixelFormat::Yuv422 || b.format() != PixelFormat::Yuv422 {
        tracing::debug!(
            a_format = ?a.format(),
            b_format = ?b.format(),
            "unsupported pixel format pairing, passing frame through"
        );
        return Ok(());
    }

    let width = a.width() as i32;
    let height = a.height() as i32;
    let b_width = b.width() as i32;
    let b_height = b.height() as i32;

    let cx = placement.x + (b_width >> 1);
    let cy = placement.y + (b_height >> 1);

    let mut lower_x = -cx;
    let mut upper_x = width - cx;
    let lower_y = -cy;
    let upper_y = height - cy;

    // Even-align the column range so destination chroma parity is stable.
    lower_x -= lower_x & 1;
    upper_x -= upper_x & 1;

    let x_offset = b_width >> 1;
    let y_offset = b_height >> 1;

    let a_stride = (width as usize) << 1;
    let b_stride = (b_width as usize) << 1;

    let dz = matrix.map_z(0.0, 0.0);

    let mut mask = vec![0u8; b_width as usize * b_height as usize];
    let dst = a.data_mut();
    let src = b.data();
    let src_alpha = b.alpha_mask();

    for y in lower_y..upper_y {
        let row = (y - lower_y) as usize * a_stride;
        for x in lower_x..upper_x {
            let di = row + (((x - lower_x) as usize) << 1);

            let dx = (matrix.map_x(f64::from(x), f64::from(y)) / dz + f64::from(x_offset)) as i32;
            let dy = (matrix.map_y(f64::from(x), f64::from(y)) / dz + f64::from(y_offset)) as i32;
            if dx < 0 || dx >= b_width || dy < 0 || dy >= b_height {
                continue;
            }

            let si = dy as usize * b_width as usize + dx as usize;
            let luma = dy as usize * b_stride + ((dx as usize) << 1);
            // Chroma comes from the containing even pair; the byte within
            // the pair follows the destination pixel's parity.
            let pair = (dx & !1) as usize;
            let chroma = dy as usize * b_stride + (pair << 1) + (((x & 1) as usize) << 1) + 1;

            match src_alpha {
                None => {
                    mask[si] = 255;
                    dst[di] = src[luma];
                    dst[di + 1] = src[chroma];
                }
                Some(alpha) => {
                    let coverage = alpha[si];
                    mask[si] = coverage;
                    let mix = f32::from(coverage) / 255.0;
                    dst[di] =
                        (f32::from(dst[di]) * (1.0 - mix) + mix * f32::from(src[luma])) as u8;
                    dst[di + 1] = (f32::from(dst[di + 1]) * (1.0 - mix)
                        + mix * f32::from(src[chroma])) as u8;
                }
            }
        }
    }

    b.clear_alpha_mask();
    b.set_alpha_mask(mask)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
