use std::collections::TryReserveError;

use ironrdp_core::DecodeError;

use crate::rle::RleDecodeError;

#[derive(Debug)]
pub enum NscError {
    /// Input is shorter than the fixed header or than the announced plane payloads.
    MalformedHeader(DecodeError),
    /// A color plane could not be reconstructed to its expected size.
    CorruptRunLength(RleDecodeError),
    UnsupportedDimensions {
        width: u16,
        height: u16,
    },
    AllocationFailure(TryReserveError),
}

impl core::fmt::Display for NscError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NscError::MalformedHeader(_error) => write!(f, "malformed NSCodec bitmap stream header"),
            NscError::CorruptRunLength(_error) => write!(f, "corrupt NSCodec color plane data"),
            NscError::UnsupportedDimensions { width, height } => {
                write!(f, "unsupported NSCodec bitmap dimensions: {width}x{height}")
            }
            NscError::AllocationFailure(_error) => write!(f, "failed to allocate NSCodec plane buffers"),
        }
    }
}

impl core::error::Error for NscError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            NscError::MalformedHeader(err) => Some(err),
            NscError::CorruptRunLength(err) => Some(err),
            NscError::UnsupportedDimensions { .. } => None,
            NscError::AllocationFailure(err) => Some(err),
        }
    }
}

impl From<DecodeError> for NscError {
    fn from(err: DecodeError) -> Self {
        NscError::MalformedHeader(err)
    }
}

impl From<RleDecodeError> for NscError {
    fn from(err: RleDecodeError) -> Self {
        NscError::CorruptRunLength(err)
    }
}

impl From<TryReserveError> for NscError {
    fn from(err: TryReserveError) -> Self {
        NscError::AllocationFailure(err)
    }
}
