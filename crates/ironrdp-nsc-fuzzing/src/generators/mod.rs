//! Test case generators.
//!
//! Test case generators take raw, unstructured input from a fuzzer
//! (e.g. libFuzzer) and translate that into a structured test case.

/// A bitmap stream together with the dimensions negotiated for it.
#[derive(Arbitrary, Debug)]
pub struct NscInput<'a> {
    pub width: u8,
    pub height: u8,
    pub src: &'a [u8],
}

impl<'a> NscInput<'a> {
    /// Reads a regression test case: width, height, then the bitmap stream.
    pub fn from_test_case(test_case: &'a [u8]) -> Option<Self> {
        match test_case {
            [width, height, src @ ..] => Some(Self {
                width: *width,
                height: *height,
                src,
            }),
            _ => None,
        }
    }
}

/// A run-length encoded plane and the size it is expected to expand to.
#[derive(Arbitrary, Debug)]
pub struct RleInput<'a> {
    pub target: u16,
    pub src: &'a [u8],
}

impl<'a> RleInput<'a> {
    /// Reads a regression test case: little-endian target length, then the encoded plane.
    pub fn from_test_case(test_case: &'a [u8]) -> Option<Self> {
        match test_case {
            [low, high, src @ ..] => Some(Self {
                target: u16::from_le_bytes([*low, *high]),
                src,
            }),
            _ => None,
        }
    }
}
