//! NSCodec bitmap stream (`NSCODEC_BITMAP_STREAM`, [MS-RDPNSC] 2.2.1)

use ironrdp_core::{ensure_fixed_part_size, ensure_size, invalid_field_err, Decode, DecodeResult, ReadCursor};

/// Number of color planes carried by a bitmap stream.
pub const PLANE_COUNT: usize = 4;

/// Color plane of an NSCodec bitmap stream, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Luma
    Y,
    /// Orange chroma
    Co,
    /// Green chroma
    Cg,
    Alpha,
}

impl Plane {
    pub const ALL: [Plane; PLANE_COUNT] = [Plane::Y, Plane::Co, Plane::Cg, Plane::Alpha];

    pub const fn index(self) -> usize {
        match self {
            Plane::Y => 0,
            Plane::Co => 1,
            Plane::Cg => 2,
            Plane::Alpha => 3,
        }
    }
}

/// Fixed part of the bitmap stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NscStreamHeader {
    /// Compressed size of each plane, in [`Plane::ALL`] order.
    pub plane_byte_counts: [u32; PLANE_COUNT],
    /// Number of low chroma bits discarded by the encoder.
    pub color_loss_level: u8,
    pub chroma_subsampling: bool,
}

impl NscStreamHeader {
    pub fn plane_byte_count(&self, plane: Plane) -> u32 {
        self.plane_byte_counts[plane.index()]
    }
}

/// Bitmap stream with its plane payloads borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NscStream<'a> {
    header: NscStreamHeader,
    planes: [&'a [u8]; PLANE_COUNT],
}

impl<'a> NscStream<'a> {
    pub const NAME: &'static str = "NscStream";

    const FIXED_PART_SIZE: usize = 4 * PLANE_COUNT /* PlaneByteCount */
        + 1 /* ColorLossLevel */
        + 1 /* ChromaSubsamplingLevel */
        + 2 /* Reserved */;

    pub fn header(&self) -> &NscStreamHeader {
        &self.header
    }

    /// Compressed payload of `plane`, exactly `plane_byte_count(plane)` bytes long.
    pub fn plane(&self, plane: Plane) -> &'a [u8] {
        self.planes[plane.index()]
    }

    pub fn payload_size(&self) -> usize {
        self.planes.iter().map(|plane| plane.len()).sum()
    }
}

impl<'de> Decode<'de> for NscStream<'de> {
    fn decode(src: &mut ReadCursor<'de>) -> DecodeResult<Self> {
        ensure_fixed_part_size!(in: src);

        let mut plane_byte_counts = [0u32; PLANE_COUNT];
        for count in plane_byte_counts.iter_mut() {
            *count = src.read_u32();
        }

        let color_loss_level = src.read_u8();
        let chroma_subsampling = src.read_u8() != 0;
        src.advance(2); // Reserved

        let empty: &[u8] = &[];
        let mut planes = [empty; PLANE_COUNT];

        for (plane, byte_count) in planes.iter_mut().zip(plane_byte_counts) {
            let size = plane_size(byte_count)?;
            ensure_size!(in: src, size: size);
            *plane = src.read_slice(size);
        }

        if !src.is_empty() {
            trace!(trailing = src.len(), "Ignoring bytes after the last color plane");
        }

        Ok(Self {
            header: NscStreamHeader {
                plane_byte_counts,
                color_loss_level,
                chroma_subsampling,
            },
            planes,
        })
    }
}

fn plane_size(byte_count: u32) -> DecodeResult<usize> {
    usize::try_from(byte_count).map_err(|_| invalid_field_err!("planeByteCount", "plane size does not fit in memory"))
}
