use std::path::{Path, PathBuf};

use crate::{
    encode::ffmpeg::{EncodeConfig, run_encoder},
    foundation::error::ReelResult,
    frame_log::FrameLog,
    manifest::write_manifest_file,
};

/// Default working directory used by the CLI when none is given.
pub const DEFAULT_WORK_DIR: &str = "../output";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertReport {
    pub frames: usize,
    pub manifest_path: PathBuf,
    pub out_path: PathBuf,
}

/// Read `frames.json` and write `concatfile`, both inside `dir`. No encoder is run.
#[tracing::instrument]
pub fn prepare_manifest(dir: &Path) -> ReelResult<(PathBuf, usize)> {
    let log = FrameLog::open(dir)?;
    write_manifest_file(dir, log)
}

/// Full conversion of one working directory with the fixed `ffmpeg` settings.
pub fn convert_dir(dir: &Path) -> ReelResult<ConvertReport> {
    convert_dir_with(dir, &EncodeConfig::for_dir(dir))
}

#[tracing::instrument(skip(cfg))]
pub fn convert_dir_with(dir: &Path, cfg: &EncodeConfig) -> ReelResult<ConvertReport> {
    let (manifest_path, frames) = prepare_manifest(dir)?;
    tracing::info!(frames, "manifest ready");

    let cfg = EncodeConfig {
        manifest_path: manifest_path.clone(),
        ..cfg.clone()
    };
    run_encoder(&cfg)?;

    Ok(ConvertReport {
        frames,
        manifest_path,
        out_path: cfg.out_path,
    })
}
