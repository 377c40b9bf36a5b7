use std::collections::TryReserveError;

use ironrdp_core::decode;

use crate::color_conversion::{self, ColorPlanes};
use crate::pdu::{NscStream, NscStreamHeader, Plane, PLANE_COUNT};
use crate::{color_loss, rle, subsampling, NscError, PlaneSizes};

/// NSCodec decoding context.
///
/// One decoder is meant to be used for the whole session: plane buffers are kept between messages
/// and only grown when needed.
#[derive(Debug, Default)]
pub struct NscDecoder {
    width: u16,
    height: u16,
    /// Header of the last successfully decoded message, `None` when `bitmap` is not valid.
    header: Option<NscStreamHeader>,
    planes: [Vec<u8>; PLANE_COUNT],
    co: Vec<i16>,
    cg: Vec<i16>,
    bitmap: Vec<u8>,
}

impl NscDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(width: u16, height: u16) -> Self {
        let mut decoder = Self::new();
        decoder.set_dimensions(width, height);
        decoder
    }

    /// Sets the size of the bitmaps carried by the next messages.
    ///
    /// Changing the dimensions releases all buffers and invalidates the current bitmap.
    pub fn set_dimensions(&mut self, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.reset();
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Header of the last successfully decoded message.
    pub fn last_header(&self) -> Option<&NscStreamHeader> {
        self.header.as_ref()
    }

    /// BGRA8888 bitmap produced by the last successful [`Self::process_message`] call.
    pub fn bitmap(&self) -> Option<&[u8]> {
        self.header.is_some().then_some(self.bitmap.as_slice())
    }

    pub fn into_bitmap(self) -> Option<Vec<u8>> {
        self.header.is_some().then_some(self.bitmap)
    }

    /// Releases every buffer and forgets the last decoded message, dimensions are kept.
    pub fn reset(&mut self) {
        self.header = None;
        self.planes = Default::default();
        self.co = Vec::new();
        self.cg = Vec::new();
        self.bitmap = Vec::new();
    }

    /// Decodes an NSCodec bitmap stream into a `width * height` BGRA8888 bitmap.
    ///
    /// On error, the decoder is reset and no bitmap is available until the next successful call.
    pub fn process_message(&mut self, bitmap_data: &[u8]) -> Result<&[u8], NscError> {
        if let Err(error) = self.decode_message(bitmap_data) {
            self.reset();
            return Err(error);
        }

        Ok(&self.bitmap)
    }

    fn decode_message(&mut self, bitmap_data: &[u8]) -> Result<(), NscError> {
        self.header = None;

        let stream = decode::<NscStream<'_>>(bitmap_data)?;
        let header = *stream.header();
        let sizes = PlaneSizes::compute(self.width, self.height, header.chroma_subsampling)?;

        debug!(
            width = self.width,
            height = self.height,
            color_loss_level = header.color_loss_level,
            chroma_subsampling = header.chroma_subsampling,
            plane_byte_counts = ?header.plane_byte_counts,
            "Decoding NSCodec bitmap stream"
        );

        for (buffer, size) in self.planes.iter_mut().zip(sizes.target) {
            resize_buffer(buffer, size, 0)?;
        }
        resize_buffer(&mut self.co, sizes.plane(Plane::Co), 0)?;
        resize_buffer(&mut self.cg, sizes.plane(Plane::Cg), 0)?;
        resize_buffer(&mut self.bitmap, sizes.bitmap, 0)?;

        for plane in Plane::ALL {
            let src = stream.plane(plane);
            let encoding = rle::decode_plane(plane, src, &mut self.planes[plane.index()])?;

            trace!(?plane, ?encoding, byte_count = src.len(), target = sizes.plane(plane), "Plane decoded");
        }

        color_loss::expand(&self.planes[Plane::Co.index()], &mut self.co, header.color_loss_level);
        color_loss::expand(&self.planes[Plane::Cg.index()], &mut self.cg, header.color_loss_level);

        if header.chroma_subsampling {
            self.co = subsampling::upsample_chroma(&self.co, sizes.width)?;
            self.cg = subsampling::upsample_chroma(&self.cg, sizes.width)?;
        }

        color_conversion::ycocg_to_bgra(
            ColorPlanes {
                y: &self.planes[Plane::Y.index()],
                co: &self.co,
                cg: &self.cg,
                alpha: &self.planes[Plane::Alpha.index()],
            },
            sizes.width,
            sizes.row_padding(),
            &mut self.bitmap,
        );

        self.header = Some(header);

        Ok(())
    }
}

/// Resizes `buffer` to exactly `len` elements set to `value`, reusing its allocation when possible.
fn resize_buffer<T: Clone>(buffer: &mut Vec<T>, len: usize, value: T) -> Result<(), TryReserveError> {
    buffer.clear();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, value);

    Ok(())
}
