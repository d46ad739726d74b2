//! Capture loading and route extraction

mod extractor;
mod har;

pub use extractor::{CaptureExtractor, RouteEntry, RouteKey, RouteMap};
pub use har::{Capture, CapturedExchange};
