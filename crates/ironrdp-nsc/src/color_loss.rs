//! Chroma color loss recovery ([MS-RDPNSC] 3.1.8.1.3)

/// Chroma samples are 9-bit two's complement values once shifted back.
const SIGN_BIT: u16 = 0x100;
const SAMPLE_MASK: u16 = 0x1FF;

/// Restores a reduced-precision chroma byte into a signed sample.
pub fn expand_sample(value: u8, color_loss_level: u8) -> i16 {
    // Only the low 9 bits survive, anything shifted past them is gone.
    let shifted = if color_loss_level < 9 {
        (u16::from(value) << color_loss_level) & SAMPLE_MASK
    } else {
        0
    };

    let extended = if shifted & SIGN_BIT != 0 {
        shifted | !SAMPLE_MASK
    } else {
        shifted
    };

    extended.cast_signed()
}

/// Expands a decoded Co or Cg plane into signed samples.
///
/// # Panics
///
/// If `src` and `dst` lengths differ.
pub fn expand(src: &[u8], dst: &mut [i16], color_loss_level: u8) {
    assert_eq!(src.len(), dst.len());

    for (sample, value) in dst.iter_mut().zip(src.iter().copied()) {
        *sample = expand_sample(value, color_loss_level);
    }
}
