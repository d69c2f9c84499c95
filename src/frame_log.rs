use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::foundation::error::{ReelError, ReelResult};

/// File name of the frame log inside a working directory.
pub const FRAME_LOG_FILE: &str = "frames.json";

/// A JSON number as logged. Integers stay exact; anything else is a float.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum Step {
    Int(i64),
    Float(f64),
}

impl Step {
    pub fn as_f64(self) -> f64 {
        match self {
            Step::Int(v) => v as f64,
            Step::Float(v) => v,
        }
    }

    /// `self - previous`, or `None` when `self` is lower than `previous`.
    ///
    /// Two integers give an integer delta; any float involved gives a float.
    pub fn delta_since(self, previous: Step) -> Option<Step> {
        match (previous, self) {
            (Step::Int(a), Step::Int(b)) => {
                if b < a {
                    return None;
                }
                Some(
                    b.checked_sub(a)
                        .map(Step::Int)
                        .unwrap_or(Step::Float(b as f64 - a as f64)),
                )
            }
            (a, b) => {
                let d = b.as_f64() - a.as_f64();
                (d >= 0.0).then_some(Step::Float(d))
            }
        }
    }
}

impl From<i64> for Step {
    fn from(v: i64) -> Self {
        Step::Int(v)
    }
}

impl From<i32> for Step {
    fn from(v: i32) -> Self {
        Step::Int(v.into())
    }
}

impl From<f64> for Step {
    fn from(v: f64) -> Self {
        Step::Float(v)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Int(v) => write!(f, "{v}"),
            Step::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One line of the frame log: an image on disk and the step it was captured at.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FrameRecord {
    pub path: String,
    pub step: Step,
    /// Sequential frame counter written by the recorder. Carried, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,
}

impl FrameRecord {
    pub fn new(path: impl Into<String>, step: impl Into<Step>) -> Self {
        Self {
            path: path.into(),
            step: step.into(),
            frame: None,
        }
    }

    /// Manifest entries are line-based, so a path must not carry control characters.
    pub fn path_is_manifest_safe(&self) -> bool {
        !self.path.chars().any(char::is_control)
    }
}

/// Lazy, single-pass reader over a line-delimited JSON frame log.
///
/// Records come out in file order. The first malformed line ends the useful
/// part of the sequence; callers are expected to stop at the first `Err`.
pub struct FrameLog<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl FrameLog<BufReader<File>> {
    /// Open `<dir>/frames.json`.
    pub fn open(dir: &Path) -> ReelResult<Self> {
        let path = dir.join(FRAME_LOG_FILE);
        let f = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ReelError::MissingFrameLog(path));
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("open frame log '{}'", path.display()))
                    .into());
            }
        };
        tracing::debug!(path = %path.display(), "opened frame log");
        Ok(Self::from_reader(BufReader::new(f)))
    }
}

impl<R: BufRead> FrameLog<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    /// 1-based number of the last line handed out (0 before the first).
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for FrameLog<R> {
    type Item = ReelResult<FrameRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_no += 1;
                Some(parse_record(self.line_no, &self.buf))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

// Raw bytes go straight to serde_json so invalid UTF-8 is reported as a parse error.
fn parse_record(line_no: usize, line: &[u8]) -> ReelResult<FrameRecord> {
    let rec: FrameRecord =
        serde_json::from_slice(line).map_err(|e| ReelError::parse(line_no, e.to_string()))?;
    if !rec.path_is_manifest_safe() {
        return Err(ReelError::parse(line_no, "path contains control characters"));
    }
    Ok(rec)
}
