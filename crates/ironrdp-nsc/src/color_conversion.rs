//! YCoCg to BGRA conversion ([MS-RDPNSC] 3.1.8.1.5)

/// Decoded planes, with chroma already expanded and upsampled to the luma resolution.
#[derive(Debug, Clone, Copy)]
pub struct ColorPlanes<'a> {
    pub y: &'a [u8],
    pub co: &'a [i16],
    pub cg: &'a [i16],
    pub alpha: &'a [u8],
}

/// Combines one pixel into BGRA bytes.
///
/// Components wrap around instead of being clamped, this is what the encoders expect.
/// A transparent alpha value is treated as fully opaque.
pub fn ycocg_to_bgra_pixel(y: u8, co: i16, cg: i16, alpha: u8) -> [u8; 4] {
    #![allow(clippy::similar_names)] // It’s hard to find better names for co, cg, etc.

    let y = i16::from(y);
    let half_co = co / 2;
    let half_cg = cg / 2;

    let r = y.wrapping_add(half_co).wrapping_sub(half_cg);
    let g = y.wrapping_add(half_cg);
    let b = y.wrapping_sub(half_co).wrapping_sub(half_cg);

    let a = if alpha == 0 { 0xFF } else { alpha };

    [low_byte(b), low_byte(g), low_byte(r), a]
}

fn low_byte(value: i16) -> u8 {
    value.to_le_bytes()[0]
}

/// Writes a `width` pixels wide BGRA8888 image into `dst`.
///
/// Luma and chroma rows are `width + row_padding` samples long, alpha rows are exactly `width`
/// samples long. The number of rows is `dst.len() / (width * 4)`.
///
/// # Panics
///
/// If `width` is 0 or a plane is too small for the image.
pub fn ycocg_to_bgra(planes: ColorPlanes<'_>, width: usize, row_padding: usize, dst: &mut [u8]) {
    assert!(width > 0);

    let stride = width + row_padding;

    for (row_idx, dst_row) in dst.chunks_exact_mut(width * 4).enumerate() {
        let src_start = row_idx * stride;
        let src_range = src_start..src_start + width;
        let alpha_start = row_idx * width;

        let y_row = &planes.y[src_range.clone()];
        let co_row = &planes.co[src_range.clone()];
        let cg_row = &planes.cg[src_range];
        let alpha_row = &planes.alpha[alpha_start..alpha_start + width];

        let samples = y_row.iter().zip(co_row).zip(cg_row).zip(alpha_row);

        for (pixel, (((&y, &co), &cg), &alpha)) in dst_row.chunks_exact_mut(4).zip(samples) {
            pixel.copy_from_slice(&ycocg_to_bgra_pixel(y, co, cg, alpha));
        }
    }
}
