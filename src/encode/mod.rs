//! Hand-off to the external encoder.

/// Fixed `ffmpeg` invocation over a concat manifest.
pub mod ffmpeg;
