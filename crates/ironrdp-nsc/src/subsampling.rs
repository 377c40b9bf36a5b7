//! Chroma supersampling ([MS-RDPNSC] 3.1.8.1.4)

use std::collections::TryReserveError;

use crate::plane::pad8;

/// Upsamples a quarter-resolution chroma plane of a `width` pixels wide image.
///
/// Input rows are `pad8(width) / 2` samples long. Every sample is replicated into a 2x2 block,
/// so the returned plane has `4 * src.len()` samples in rows of `pad8(width)`.
///
/// # Panics
///
/// If `width` is 0.
pub fn upsample_chroma(src: &[i16], width: usize) -> Result<Vec<i16>, TryReserveError> {
    assert!(width > 0);

    let chroma_width = pad8(width) / 2;

    let mut dst = Vec::new();
    dst.try_reserve_exact(src.len() * 4)?;

    for row in src.chunks(chroma_width) {
        // Same doubled row twice: once for the current line, once for the line below.
        for _ in 0..2 {
            dst.extend(row.iter().flat_map(|&sample| [sample, sample]));
        }
    }

    Ok(dst)
}
