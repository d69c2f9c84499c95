//! Concat-demuxer manifest generation.
//!
//! The concat format attaches a `duration` line to the `file` line *before* it,
//! so durations trail the file entries by one frame. The last file gets no
//! duration unless another entry follows it, hence the duplicated final entry.

use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{ReelError, ReelResult},
    frame_log::{FrameRecord, Step},
};

/// File name of the manifest inside a working directory.
pub const MANIFEST_FILE: &str = "concatfile";

/// Duration given to the duplicated last frame.
pub const TRAILING_HOLD: Step = Step::Int(10);

#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    File(String),
    Duration(Step),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::File(path) => write!(f, "file '{}'", path.replace('\'', r"'\''")),
            Directive::Duration(d) => write!(f, "duration {d}"),
        }
    }
}

/// Step bookkeeping shared by the streaming writer and [`build_manifest`].
#[derive(Debug, Default)]
struct ManifestState {
    previous_step: Option<Step>,
    last_entry: Option<Directive>,
    frames: usize,
}

impl ManifestState {
    fn push(&mut self, rec: &FrameRecord) -> ReelResult<(Option<Directive>, Directive)> {
        let line = self.frames + 1;
        if !rec.path_is_manifest_safe() {
            return Err(ReelError::validation(format!(
                "line {line}: path contains control characters"
            )));
        }

        let duration = match self.previous_step {
            None => None,
            Some(previous) => {
                let delta = rec
                    .step
                    .delta_since(previous)
                    .ok_or(ReelError::NonMonotonicStep {
                        line,
                        step: rec.step,
                        previous,
                    })?;
                Some(Directive::Duration(delta))
            }
        };

        let entry = Directive::File(rec.path.clone());
        self.previous_step = Some(rec.step);
        self.last_entry = Some(entry.clone());
        self.frames = line;
        Ok((duration, entry))
    }

    fn finish(self) -> ReelResult<[Directive; 2]> {
        let last = self.last_entry.ok_or(ReelError::EmptyInput)?;
        Ok([Directive::Duration(TRAILING_HOLD), last])
    }
}

/// Writes manifest lines as records arrive.
pub struct ManifestWriter<W: Write> {
    out: W,
    state: ManifestState,
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: ManifestState::default(),
        }
    }

    pub fn push(&mut self, rec: &FrameRecord) -> ReelResult<()> {
        let (duration, entry) = self.state.push(rec)?;
        if let Some(d) = duration {
            writeln!(self.out, "{d}")?;
        }
        writeln!(self.out, "{entry}")?;
        Ok(())
    }

    /// Number of records pushed so far.
    pub fn frames(&self) -> usize {
        self.state.frames
    }

    /// Write the trailing hold and hand back the sink. Fails on an empty sequence.
    pub fn finish(mut self) -> ReelResult<(W, usize)> {
        let frames = self.state.frames;
        for d in self.state.finish()? {
            writeln!(self.out, "{d}")?;
        }
        self.out.flush()?;
        Ok((self.out, frames))
    }
}

/// Stream `records` into `out`, stopping at the first error. Returns the frame count.
pub fn write_manifest<I, W>(records: I, out: W) -> ReelResult<usize>
where
    I: IntoIterator<Item = ReelResult<FrameRecord>>,
    W: Write,
{
    let mut writer = ManifestWriter::new(out);
    for rec in records {
        writer.push(&rec?)?;
    }
    let (_, frames) = writer.finish()?;
    Ok(frames)
}

/// Create (or truncate) `<dir>/concatfile` and stream `records` into it.
#[tracing::instrument(skip(records))]
pub fn write_manifest_file<I>(dir: &Path, records: I) -> ReelResult<(PathBuf, usize)>
where
    I: IntoIterator<Item = ReelResult<FrameRecord>>,
{
    use anyhow::Context as _;

    let path = dir.join(MANIFEST_FILE);
    let f = File::create(&path)
        .with_context(|| format!("create manifest '{}'", path.display()))?;
    let frames = write_manifest(records, BufWriter::new(f))?;
    tracing::debug!(frames, path = %path.display(), "wrote manifest");
    Ok((path, frames))
}

/// In-memory variant of [`write_manifest`].
pub fn build_manifest(records: &[FrameRecord]) -> ReelResult<Vec<Directive>> {
    let mut state = ManifestState::default();
    let mut out = Vec::with_capacity(records.len() * 2 + 1);
    for rec in records {
        let (duration, entry) = state.push(rec)?;
        out.extend(duration);
        out.push(entry);
    }
    out.extend(state.finish()?);
    Ok(out)
}
