//! Oracles.
//!
//! Oracles take a test case and determine whether we have a bug. Decoding
//! arbitrary input must never panic, and a successful decode must produce
//! exactly the amount of data the caller asked for.
//!
//! When an oracle finds a bug, it should report it to the fuzzing engine by
//! panicking.

use ironrdp_nsc::{rle, NscDecoder};

use crate::generators::{NscInput, RleInput};

pub fn nsc_decode(input: NscInput<'_>) {
    let width = u16::from(input.width);
    let height = u16::from(input.height);

    let mut decoder = NscDecoder::with_dimensions(width, height);

    if let Ok(bitmap) = decoder.process_message(input.src) {
        assert_eq!(bitmap.len(), usize::from(width) * usize::from(height) * 4);
    }

    // A failed message must not leave the context unusable.
    let _ = decoder.process_message(input.src);
}

pub fn nsc_rle_decompress(input: RleInput<'_>) {
    let mut dst = vec![0; usize::from(input.target)];

    if let Ok(consumed) = rle::decompress(input.src, &mut dst) {
        assert!(consumed <= input.src.len());
    }
}
