use crate::foundation::error::{KeywarpError, KeywarpResult};

/// Pixel formats understood by the frame model.
///
/// The compositor itself only processes [`PixelFormat::Yuv422`] pairings;
/// any other pairing degrades to a pass-through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// Packed YUV 4:2:2 (Y U Y V), two bytes per pixel, even width.
    Yuv422,
    /// Interleaved RGBA, four bytes per pixel.
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Yuv422 => 2,
            Self::Rgba8 => 4,
        }
    }

    /// Expected buffer length for a `width` × `height` image.
    pub fn buffer_len(self, width: u32, height: u32) -> usize {
        width as usize * height as usize * self.bytes_per_pixel()
    }
}

/// Sampling-quality hint carried by a frame.
///
/// The hint is propagated to collaborators that rescale frames; the
/// compositor's own sampling is always nearest-neighbor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interp {
    /// No rescaling requested.
    #[default]
    None,
    /// Nearest-neighbor sampling.
    Nearest,
    /// Bilinear sampling.
    Bilinear,
    /// High-quality sampling.
    Hyper,
}

/// One borrowed video frame: image buffer, format, dimensions, and the
/// optional per-pixel coverage/alpha buffer attached by a compositor.
///
/// Frames also carry the consumer's normalization dimensions (the reference
/// resolution percentage geometry is resolved against, independent of the
/// actual buffer resolution) and sampling hints for downstream rescalers.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    format: PixelFormat,
    width: u32,
    height: u32,
    norm_width: u32,
    norm_height: u32,
    alpha: Option<Vec<u8>>,
    interp: Interp,
    distort: bool,
}

impl Frame {
    /// Wrap an image buffer, validating its length against the format.
    ///
    /// Packed 4:2:2 additionally requires an even width so every row is a
    /// whole number of chroma pairs. Normalization dimensions default to the
    /// buffer dimensions.
    pub fn new(data: Vec<u8>, format: PixelFormat, width: u32, height: u32) -> KeywarpResult<Self> {
        if format == PixelFormat::Yuv422 && width % 2 != 0 {
            return Err(KeywarpError::validation(
                "yuv422 frames require an even width",
            ));
        }
        let expected = format.buffer_len(width, height);
        if data.len() != expected {
            return Err(KeywarpError::validation(format!(
                "frame buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            format,
            width,
            height,
            norm_width: width,
            norm_height: height,
            alpha: None,
            interp: Interp::default(),
            distort: false,
        })
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format tag.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The image bytes, mutably.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame, returning the image buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Normalization width for percentage geometry.
    pub fn norm_width(&self) -> u32 {
        self.norm_width
    }

    /// Normalization height for percentage geometry.
    pub fn norm_height(&self) -> u32 {
        self.norm_height
    }

    /// Override the normalization dimensions supplied by the consumer.
    pub fn set_normalization(&mut self, width: u32, height: u32) {
        self.norm_width = width;
        self.norm_height = height;
    }

    /// Sampling-quality hint.
    pub fn interp(&self) -> Interp {
        self.interp
    }

    /// Set the sampling-quality hint.
    pub fn set_interp(&mut self, interp: Interp) {
        self.interp = interp;
    }

    /// Distortion hint (skip aspect-preserving padding when rescaling).
    pub fn distort(&self) -> bool {
        self.distort
    }

    /// Set the distortion hint.
    pub fn set_distort(&mut self, distort: bool) {
        self.distort = distort;
    }

    /// The attached per-pixel coverage/alpha buffer, if any.
    pub fn alpha_mask(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }

    /// Attach a coverage/alpha buffer, superseding any prior mask.
    ///
    /// The buffer must hold one byte per pixel. Ownership moves into the
    /// frame; release is bound to the frame's lifetime.
    pub fn set_alpha_mask(&mut self, mask: Vec<u8>) -> KeywarpResult<()> {
        let expected = self.width as usize * self.height as usize;
        if mask.len() != expected {
            return Err(KeywarpError::validation(format!(
                "alpha mask is {} bytes, expected {expected}",
                mask.len()
            )));
        }
        self.alpha = Some(mask);
        Ok(())
    }

    /// Detach and return the coverage/alpha buffer, if any.
    pub fn clear_alpha_mask(&mut self) -> Option<Vec<u8>> {
        self.alpha.take()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
