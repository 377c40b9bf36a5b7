#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![doc(html_logo_url = "https://cdnweb.devolutions.net/images/projects/devolutions/logos/devolutions-icon-shadow.svg")]

#[macro_use]
extern crate tracing;

pub mod color_conversion;
pub mod color_loss;
pub mod pdu;
pub mod rle;
pub mod subsampling;

mod decoder;
mod error;
mod plane;

pub use decoder::NscDecoder;
pub use error::NscError;
pub use pdu::{NscStream, NscStreamHeader, Plane, PLANE_COUNT};
pub use plane::{pad2, pad8, PlaneSizes};
