//! Stepreel turns a log of timestamped frame snapshots into a single video.
//!
//! A run works on one directory:
//!
//! 1. **Read** `frames.json`, one JSON record (`path`, `step`) per line.
//! 2. **Build** `concatfile`, a concat-demuxer manifest whose per-frame
//!    durations are the deltas between consecutive steps.
//! 3. **Encode** by running the system `ffmpeg` once over the manifest,
//!    producing `out.mkv`.
//!
//! Video encoding itself is delegated entirely to `ffmpeg`.
#![forbid(unsafe_code)]

pub mod encode;
pub mod foundation;
pub mod frame_log;
pub mod manifest;
pub mod pipeline;

pub use encode::ffmpeg::{EncodeConfig, OUTPUT_FILE, is_encoder_on_path, run_encoder};
pub use foundation::error::{ReelError, ReelResult};
pub use frame_log::{FRAME_LOG_FILE, FrameLog, FrameRecord, Step};
pub use manifest::{
    Directive, MANIFEST_FILE, ManifestWriter, TRAILING_HOLD, build_manifest, write_manifest,
    write_manifest_file,
};
pub use pipeline::{
    ConvertReport, DEFAULT_WORK_DIR, convert_dir, convert_dir_with, prepare_manifest,
};
