//! HTTP protocol layer: response builders, MIME inference, conditional and
//! ranged request handling, and the cross-origin isolation decorator.

pub mod cache;
pub mod isolation;
pub mod mime;
pub mod range;
pub mod response;

pub use response::Body;
