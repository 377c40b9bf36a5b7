use crate::pdu::{Plane, PLANE_COUNT};
use crate::NscError;

/// Rounds `n` up to the next multiple of 8.
pub const fn pad8(n: usize) -> usize {
    n.div_ceil(8) * 8
}

/// Rounds `n` up to the next multiple of 2.
pub const fn pad2(n: usize) -> usize {
    n.div_ceil(2) * 2
}

/// Decompressed size of every color plane for a given image geometry ([MS-RDPNSC] 2.2).
///
/// With chroma subsampling, the luma plane rows are padded to a multiple of 8 bytes and both
/// chroma planes are stored at half the (padded) resolution in each dimension. The alpha plane
/// always has the exact image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneSizes {
    pub width: usize,
    pub height: usize,
    pub chroma_subsampling: bool,
    /// Decompressed size of each plane, in [`Plane::ALL`] order.
    pub target: [usize; PLANE_COUNT],
    /// Size of the BGRA8888 output bitmap.
    pub bitmap: usize,
}

impl PlaneSizes {
    pub fn compute(width: u16, height: u16, chroma_subsampling: bool) -> Result<Self, NscError> {
        let unsupported = || NscError::UnsupportedDimensions { width, height };

        if width == 0 || height == 0 {
            return Err(unsupported());
        }

        let (w, h) = (usize::from(width), usize::from(height));

        let full = w.checked_mul(h).ok_or_else(unsupported)?;
        let bitmap = full.checked_mul(4).ok_or_else(unsupported)?;

        let target = if chroma_subsampling {
            let luma = pad8(w).checked_mul(h).ok_or_else(unsupported)?;
            let chroma = (pad8(w) / 2).checked_mul(pad2(h) / 2).ok_or_else(unsupported)?;

            [luma, chroma, chroma, full]
        } else {
            [full; PLANE_COUNT]
        };

        Ok(Self {
            width: w,
            height: h,
            chroma_subsampling,
            target,
            bitmap,
        })
    }

    pub fn plane(&self, plane: Plane) -> usize {
        self.target[plane.index()]
    }

    /// Number of padding samples at the end of each luma and upsampled chroma row.
    pub fn row_padding(&self) -> usize {
        if self.chroma_subsampling {
            pad8(self.width) - self.width
        } else {
            0
        }
    }
}
