//! NSCodec color plane run-length decoding ([MS-RDPNSC] 3.1.8.1.1)

use ironrdp_core::{ReadCursor, WriteCursor};
use thiserror::Error;

use crate::pdu::Plane;

/// Every RLE-compressed plane ends with this many raw bytes.
pub const RAW_TRAILER_SIZE: usize = 4;

/// Run length marker announcing a 32-bit run length.
const LONG_RUN_MARKER: u8 = 0xFF;

/// Short runs encode `run_length - 2`.
const SHORT_RUN_BIAS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RleDecodeError {
    #[error("compressed data exhausted: {received} bytes left, {expected} bytes needed")]
    NotEnoughBytes { received: usize, expected: usize },

    #[error("run of {run_length} bytes does not fit in the {available} bytes left before the raw trailer")]
    RunOverflow { run_length: usize, available: usize },

    #[error("plane of {target} bytes is too small to hold the raw trailer")]
    TargetTooSmall { target: usize },
}

/// How a plane was stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneEncoding {
    /// Absent alpha plane, every pixel is opaque.
    Opaque,
    RunLength,
    Raw,
}

impl PlaneEncoding {
    pub fn select(plane: Plane, byte_count: usize, target: usize) -> Self {
        if plane == Plane::Alpha && byte_count == 0 {
            PlaneEncoding::Opaque
        } else if byte_count < target {
            PlaneEncoding::RunLength
        } else {
            PlaneEncoding::Raw
        }
    }
}

/// Reconstructs `plane` from its wire payload `src` into `dst`.
///
/// `dst` must already have the plane's decompressed size; it is completely overwritten.
pub fn decode_plane(plane: Plane, src: &[u8], dst: &mut [u8]) -> Result<PlaneEncoding, RleDecodeError> {
    let encoding = PlaneEncoding::select(plane, src.len(), dst.len());

    match encoding {
        PlaneEncoding::Opaque => dst.fill(0xFF),
        PlaneEncoding::RunLength => {
            let consumed = decompress(src, dst)?;

            if consumed != src.len() {
                trace!(?plane, consumed, byte_count = src.len(), "Plane payload not fully consumed");
            }
        }
        PlaneEncoding::Raw => {
            let raw = src.get(..dst.len()).ok_or(RleDecodeError::NotEnoughBytes {
                received: src.len(),
                expected: dst.len(),
            })?;
            dst.copy_from_slice(raw);
        }
    }

    Ok(encoding)
}

/// Decompresses an RLE-encoded plane into `dst`, producing exactly `dst.len()` bytes.
///
/// Returns number of bytes consumed from `src`.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, RleDecodeError> {
    let target = dst.len();

    if target < RAW_TRAILER_SIZE {
        return Err(RleDecodeError::TargetTooSmall { target });
    }

    let mut src = ReadCursor::new(src);
    let mut dst = WriteCursor::new(dst);

    while dst.len() > RAW_TRAILER_SIZE {
        let value = read_u8(&mut src)?;

        // The last byte before the trailer is always a literal.
        if dst.len() == RAW_TRAILER_SIZE + 1 {
            dst.write_u8(value);
        } else if src.remaining().first() == Some(&value) {
            src.advance(1);

            let run_length = match read_u8(&mut src)? {
                LONG_RUN_MARKER => usize::try_from(read_u32(&mut src)?).unwrap_or(usize::MAX),
                short => usize::from(short) + SHORT_RUN_BIAS,
            };

            let available = dst.len() - RAW_TRAILER_SIZE;
            if run_length > available {
                return Err(RleDecodeError::RunOverflow { run_length, available });
            }

            dst.remaining_mut()[..run_length].fill(value);
            dst.advance(run_length);
        } else {
            dst.write_u8(value);
        }
    }

    ensure_available(&src, RAW_TRAILER_SIZE)?;
    dst.write_slice(src.read_slice(RAW_TRAILER_SIZE));

    Ok(src.pos())
}

fn ensure_available(src: &ReadCursor<'_>, expected: usize) -> Result<(), RleDecodeError> {
    let received = src.len();

    if received < expected {
        return Err(RleDecodeError::NotEnoughBytes { received, expected });
    }

    Ok(())
}

fn read_u8(src: &mut ReadCursor<'_>) -> Result<u8, RleDecodeError> {
    ensure_available(src, 1)?;
    Ok(src.read_u8())
}

fn read_u32(src: &mut ReadCursor<'_>) -> Result<u32, RleDecodeError> {
    ensure_available(src, 4)?;
    Ok(src.read_u32())
}
