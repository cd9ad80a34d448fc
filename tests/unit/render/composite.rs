use super::*;

use crate::geometry::track::PixelRect;
use crate::render::frame::{Frame, PixelFormat};
use crate::transform::affine::AffineMatrix;

fn yuv_uniform(width: u32, height: u32, y: u8, u: u8, v: u8) -> Frame {
    let mut data = Vec::with_capacity((width * height * 2) as usize);
    for _ in 0..(width * height / 2) {
        data.extend_from_slice(&[y, u, y, v]);
    }
    Frame::new(data, PixelFormat::Yuv422, width, height).unwrap()
}

fn rect(x: i32, y: i32, w: i32, h: i32) -> PixelRect {
    PixelRect { x, y, w, h }
}

#[test]
fn identity_transform_overwrites_the_covered_region() {
    let mut a = yuv_uniform(4, 2, 9, 8, 7);
    let mut b = yuv_uniform(4, 2, 200, 100, 50);
    let expected = b.data().to_vec();

    affine_over_in_place(&mut a, &mut b, rect(0, 0, 4, 2), &AffineMatrix::identity()).unwrap();

    assert_eq!(a.data(), &expected[..]);
    assert_eq!(b.alpha_mask(), Some(&[255u8; 8][..]));
}

#[test]
fn out_of_bounds_samples_leave_the_primary_untouched() {
    let mut a = yuv_uniform(4, 2, 9, 8, 7);
    let mut b = yuv_uniform(4, 2, 200, 100, 50);
    let before = a.data().to_vec();

    let mut matrix = AffineMatrix::identity();
    matrix.translate(100.0, 0.0);
    affine_over_in_place(&mut a, &mut b, rect(0, 0, 4, 2), &matrix).unwrap();

    assert_eq!(a.data(), &before[..]);
    assert_eq!(b.alpha_mask(), Some(&[0u8; 8][..]));
}

#[test]
fn a_wider_primary_keeps_its_uncovered_half() {
    let mut a = yuv_uniform(8, 2, 9, 8, 7);
    let mut b = yuv_uniform(4, 2, 200, 100, 50);

    affine_over_in_place(&mut a, &mut b, rect(0, 0, 4, 2), &AffineMatrix::identity()).unwrap();

    for row in 0..2usize {
        let bytes = &a.data()[row * 16..(row + 1) * 16];
        assert_eq!(&bytes[..8], &[200, 100, 200, 50, 200, 100, 200, 50]);
        assert_eq!(&bytes[8..], &[9, 8, 9, 7, 9, 8, 9, 7]);
    }
    assert_eq!(b.alpha_mask(), Some(&[255u8; 8][..]));
}

#[test]
fn upscaling_samples_sparsely_and_reports_partial_coverage() {
    let mut a = yuv_uniform(8, 2, 9, 8, 7);
    // Distinct luma per source pixel, uniform chroma (U=1, V=2).
    let b_data = vec![0, 1, 10, 2, 20, 1, 30, 2, 40, 1, 50, 2, 60, 1, 70, 2];
    let mut b = Frame::new(b_data, PixelFormat::Yuv422, 4, 2).unwrap();

    let mut matrix = AffineMatrix::identity();
    matrix.scale(2.0, 2.0);
    affine_over_in_place(&mut a, &mut b, rect(0, 0, 4, 2), &matrix).unwrap();

    // Only source pixels (0,1) and (2,1) are ever sampled.
    assert_eq!(
        b.alpha_mask(),
        Some(&[0, 0, 0, 0, 255, 0, 255, 0][..])
    );

    // Top destination row maps above the source; untouched.
    assert_eq!(&a.data()[..16], &[9, 8, 9, 7, 9, 8, 9, 7, 9, 8, 9, 7, 9, 8, 9, 7]);

    // Bottom row: columns 1 and 2 take source luma 40 and 60; the odd
    // destination column writes the V byte of the containing chroma pair.
    let bottom = &a.data()[16..];
    assert_eq!(bottom[2], 40);
    assert_eq!(bottom[3], 2);
    assert_eq!(bottom[4], 60);
    assert_eq!(bottom[5], 1);
    assert_eq!(&bottom[..2], &[9, 8]);
    assert_eq!(&bottom[6..], &[9, 7, 9, 8, 9, 7, 9, 8, 9, 7][..]);
}

#[test]
fn binary_source_alpha_selects_between_source_and_destination() {
    let mut a = yuv_uniform(4, 2, 10, 20, 30);
    let mut b = yuv_uniform(4, 2, 200, 100, 50);
    b.set_alpha_mask(vec![255, 0, 255, 0, 255, 0, 255, 0]).unwrap();

    affine_over_in_place(&mut a, &mut b, rect(0, 0, 4, 2), &AffineMatrix::identity()).unwrap();

    for row in 0..2usize {
        let bytes = &a.data()[row * 8..(row + 1) * 8];
        assert_eq!(bytes, &[200, 100, 10, 30, 200, 100, 10, 30]);
    }
    assert_eq!(b.alpha_mask(), Some(&[255, 0, 255, 0, 255, 0, 255, 0][..]));
}

#[test]
fn fractional_source_alpha_blends_linearly() {
    let mut a = yuv_uniform(4, 2, 10, 20, 30);
    let mut b = yuv_uniform(4, 2, 200, 100, 50);
    b.set_alpha_mask(vec![128; 8]).unwrap();

    affine_over_in_place(&mut a, &mut b, rect(0, 0, 4, 2), &AffineMatrix::identity()).unwrap();

    // dst*(1-128/255) + (128/255)*src, truncated.
    for row in 0..2usize {
        let bytes = &a.data()[row * 8..(row + 1) * 8];
        assert_eq!(bytes, &[105, 60, 105, 40, 105, 60, 105, 40]);
    }
    assert_eq!(b.alpha_mask(), Some(&[128u8; 8][..]));
}

#[test]
fn generated_mask_supersedes_a_prior_alpha_mask() {
    let mut a = yuv_uniform(4, 2, 10, 20, 30);
    let mut b = yuv_uniform(4, 2, 200, 100, 50);
    b.set_alpha_mask(vec![128; 8]).unwrap();

    let mut matrix = AffineMatrix::identity();
    matrix.translate(100.0, 0.0);
    affine_over_in_place(&mut a, &mut b, rect(0, 0, 4, 2), &matrix).unwrap();

    assert_eq!(b.alpha_mask(), Some(&[0u8; 8][..]));
}

#[test]
fn unsupported_format_pairing_passes_through() {
    let mut a = yuv_uniform(4, 2, 9, 8, 7);
    let before = a.data().to_vec();
    let mut b = Frame::new(vec![0; 32], PixelFormat::Rgba8, 4, 2).unwrap();

    affine_over_in_place(&mut a, &mut b, rect(0, 0, 4, 2), &AffineMatrix::identity()).unwrap();
    assert_eq!(a.data(), &before[..]);
    assert_eq!(b.alpha_mask(), None);

    let mut a_rgba = Frame::new(vec![0; 32], PixelFormat::Rgba8, 4, 2).unwrap();
    let mut b_yuv = yuv_uniform(4, 2, 200, 100, 50);
    affine_over_in_place(&mut a_rgba, &mut b_yuv, rect(0, 0, 4, 2), &AffineMatrix::identity())
        .unwrap();
    assert_eq!(a_rgba.data(), &[0u8; 32][..]);
    assert_eq!(b_yuv.alpha_mask(), None);
}
