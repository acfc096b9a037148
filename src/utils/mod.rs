//! Utility modules
//!
//! Small helpers shared by the packager and the web surface.

pub mod mime;
