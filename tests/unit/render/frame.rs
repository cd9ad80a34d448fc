use super::*;

#[test]
fn new_validates_buffer_length() {
    let frame = Frame::new(vec![0; 16], PixelFormat::Yuv422, 4, 2);
    assert!(frame.is_ok());

    let frame = Frame::new(vec![0; 15], PixelFormat::Yuv422, 4, 2);
    assert!(frame.is_err());

    let frame = Frame::new(vec![0; 32], PixelFormat::Rgba8, 4, 2);
    assert!(frame.is_ok());
}

#[test]
fn yuv422_requires_even_width() {
    let frame = Frame::new(vec![0; 6], PixelFormat::Yuv422, 3, 1);
    assert!(frame.is_err());

    // RGBA has no pair alignment requirement.
    let frame = Frame::new(vec![0; 12], PixelFormat::Rgba8, 3, 1);
    assert!(frame.is_ok());
}

#[test]
fn normalization_defaults_to_buffer_dimensions() {
    let mut frame = Frame::new(vec![0; 16], PixelFormat::Yuv422, 4, 2).unwrap();
    assert_eq!(frame.norm_width(), 4);
    assert_eq!(frame.norm_height(), 2);

    frame.set_normalization(720, 576);
    assert_eq!(frame.norm_width(), 720);
    assert_eq!(frame.norm_height(), 576);
}

#[test]
fn hints_default_to_no_rescale_and_no_distort() {
    let mut frame = Frame::new(vec![0; 16], PixelFormat::Yuv422, 4, 2).unwrap();
    assert_eq!(frame.interp(), Interp::None);
    assert!(!frame.distort());

    frame.set_interp(Interp::Bilinear);
    frame.set_distort(true);
    assert_eq!(frame.interp(), Interp::Bilinear);
    assert!(frame.distort());
}

#[test]
fn alpha_mask_length_is_validated() {
    let mut frame = Frame::new(vec![0; 16], PixelFormat::Yuv422, 4, 2).unwrap();
    assert!(frame.set_alpha_mask(vec![255; 7]).is_err());
    assert!(frame.set_alpha_mask(vec![255; 8]).is_ok());
}

#[test]
fn a_new_alpha_mask_supersedes_the_previous_one() {
    let mut frame = Frame::new(vec![0; 16], PixelFormat::Yuv422, 4, 2).unwrap();
    frame.set_alpha_mask(vec![1; 8]).unwrap();
    frame.set_alpha_mask(vec![2; 8]).unwrap();
    assert_eq!(frame.alpha_mask(), Some(&[2u8; 8][..]));

    assert_eq!(frame.clear_alpha_mask(), Some(vec![2; 8]));
    assert_eq!(frame.alpha_mask(), None);
}

#[test]
fn into_data_returns_the_buffer() {
    let data: Vec<u8> = (0..16).collect();
    let frame = Frame::new(data.clone(), PixelFormat::Yuv422, 4, 2).unwrap();
    assert_eq!(frame.into_data(), data);
}
