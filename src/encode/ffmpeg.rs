use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    foundation::error::{ReelError, ReelResult},
    manifest::MANIFEST_FILE,
};

/// File name of the encoded video inside a working directory.
pub const OUTPUT_FILE: &str = "out.mkv";

pub const DEFAULT_PROGRAM: &str = "ffmpeg";

pub const OUTPUT_SIZE: &str = "1200x600";
pub const OUTPUT_FPS: u32 = 60;

/// Lines of encoder stderr kept in [`ReelError::EncoderFailed`].
pub const STDERR_TAIL_LINES: usize = 20;

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub program: OsString,
    pub manifest_path: PathBuf,
    pub out_path: PathBuf,
}

impl EncodeConfig {
    /// Fixed settings for a working directory: `concatfile` in, `out.mkv` out.
    pub fn for_dir(dir: &Path) -> Self {
        Self {
            program: OsString::from(DEFAULT_PROGRAM),
            manifest_path: dir.join(MANIFEST_FILE),
            out_path: dir.join(OUTPUT_FILE),
        }
    }

    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.program.is_empty() {
            return Err(ReelError::validation("encoder program must be non-empty"));
        }
        if !self.manifest_path.is_file() {
            return Err(ReelError::validation(format!(
                "manifest '{}' does not exist",
                self.manifest_path.display()
            )));
        }
        Ok(())
    }

    /// Argument list passed to the encoder, in order.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-f", "concat", "-i"].map(OsString::from).into();
        args.push(self.manifest_path.clone().into_os_string());
        args.extend(
            [
                "-s",
                OUTPUT_SIZE,
                "-sws_flags",
                "neighbor",
                "-vsync",
                "vfr",
                "-c:v",
                "libx264",
                "-vf",
            ]
            .map(OsString::from),
        );
        args.push(format!("settb=AVTB,setpts=N/{OUTPUT_FPS}/TB,fps={OUTPUT_FPS}").into());
        args.push("-y".into());
        args.push(self.out_path.clone().into_os_string());
        args
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

pub fn is_encoder_on_path(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run the encoder once and wait for it. Any non-success status is an error.
#[tracing::instrument(skip(cfg), fields(out = %cfg.out_path.display()))]
pub fn run_encoder(cfg: &EncodeConfig) -> ReelResult<()> {
    cfg.validate()?;

    let mut cmd = Command::new(&cfg.program);
    cmd.args(cfg.args())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped());
    tracing::info!(program = %cfg.program_name(), "starting encoder");

    let output = cmd.output().map_err(|source| ReelError::EncoderSpawn {
        program: cfg.program_name(),
        source,
    })?;

    if !output.status.success() {
        return Err(ReelError::EncoderFailed {
            program: cfg.program_name(),
            status: output.status,
            stderr: stderr_tail(&output.stderr, STDERR_TAIL_LINES),
        });
    }

    tracing::info!("encoder finished");
    Ok(())
}

// ffmpeg prints its banner and progress first; the cause is at the end.
fn stderr_tail(stderr: &[u8], max_lines: usize) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text
        .trim()
        .split(['\n', '\r'])
        .filter(|l| !l.trim().is_empty())
        .collect();
    let skip = lines.len().saturating_sub(max_lines);
    lines[skip..].join("\n")
}
