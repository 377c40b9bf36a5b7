//! Helpers to assemble NSCodec bitmap streams in tests.

use ironrdp_nsc::rle::RAW_TRAILER_SIZE;
use ironrdp_nsc::{Plane, PLANE_COUNT};

/// Builds an `NSCODEC_BITMAP_STREAM` from already encoded plane payloads.
///
/// Plane byte counts are taken from the payload lengths.
#[derive(Debug, Clone, Default)]
pub struct NscMessageBuilder {
    planes: [Vec<u8>; PLANE_COUNT],
    color_loss_level: u8,
    chroma_subsampling: bool,
    trailing: Vec<u8>,
}

impl NscMessageBuilder {
    pub fn new() -> Self {
        Self {
            color_loss_level: 1,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn plane(mut self, plane: Plane, payload: impl Into<Vec<u8>>) -> Self {
        self.planes[plane.index()] = payload.into();
        self
    }

    /// Same as [`Self::plane`], run-length encoding `samples` first.
    #[must_use]
    pub fn rle_plane(self, plane: Plane, samples: &[u8]) -> Self {
        self.plane(plane, rle_encode(samples))
    }

    #[must_use]
    pub fn color_loss_level(mut self, color_loss_level: u8) -> Self {
        self.color_loss_level = color_loss_level;
        self
    }

    #[must_use]
    pub fn chroma_subsampling(mut self, chroma_subsampling: bool) -> Self {
        self.chroma_subsampling = chroma_subsampling;
        self
    }

    /// Same as [`Self::plane`], picking the smallest encoding for `samples`.
    #[must_use]
    pub fn samples(self, plane: Plane, samples: &[u8]) -> Self {
        self.plane(plane, encode_plane(samples))
    }

    /// Garbage appended after the last plane.
    #[must_use]
    pub fn trailing(mut self, trailing: impl Into<Vec<u8>>) -> Self {
        self.trailing = trailing.into();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buffer = Vec::new();

        for payload in &self.planes {
            let byte_count = u32::try_from(payload.len()).expect("plane payload too large");
            buffer.extend_from_slice(&byte_count.to_le_bytes());
        }

        buffer.push(self.color_loss_level);
        buffer.push(u8::from(self.chroma_subsampling));
        buffer.extend_from_slice(&[0, 0]); // Reserved

        for payload in &self.planes {
            buffer.extend_from_slice(payload);
        }
        buffer.extend_from_slice(&self.trailing);

        buffer
    }
}

/// Run-length encodes a plane the way NSCodec encoders do.
///
/// # Panics
///
/// If `samples` is shorter than the raw trailer.
pub fn rle_encode(samples: &[u8]) -> Vec<u8> {
    assert!(samples.len() >= RAW_TRAILER_SIZE);

    let (body, trailer) = samples.split_at(samples.len() - RAW_TRAILER_SIZE);
    let mut encoded = Vec::new();
    let mut pos = 0;

    while let Some(&value) = body.get(pos) {
        // The decoder never looks for a run on the last byte before the trailer.
        if pos + 1 == body.len() {
            encoded.push(value);
            break;
        }

        let run_length = body[pos..].iter().take_while(|&&sample| sample == value).count();

        if run_length == 1 {
            encoded.push(value);
        } else {
            encoded.extend_from_slice(&[value, value]);

            match u8::try_from(run_length - 2) {
                Ok(short) if short != 0xFF => encoded.push(short),
                _ => {
                    let run_length = u32::try_from(run_length).expect("run too long");
                    encoded.push(0xFF);
                    encoded.extend_from_slice(&run_length.to_le_bytes());
                }
            }
        }

        pos += run_length;
    }

    encoded.extend_from_slice(trailer);

    encoded
}

/// Encodes a plane as an encoder would: run-length encoded when this makes it smaller, raw otherwise.
pub fn encode_plane(samples: &[u8]) -> Vec<u8> {
    if samples.len() >= RAW_TRAILER_SIZE {
        let encoded = rle_encode(samples);

        if encoded.len() < samples.len() {
            return encoded;
        }
    }

    samples.to_vec()
}

/// Expected BGRA8888 bitmap for a uniform `width * height` image.
pub fn uniform_bitmap(width: usize, height: usize, pixel: [u8; 4]) -> Vec<u8> {
    pixel.repeat(width * height)
}
