use std::{path::PathBuf, process::ExitStatus};

use crate::frame_log::Step;

pub type ReelResult<T> = Result<T, ReelError>;

#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    #[error("frame log not found: '{}'", .0.display())]
    MissingFrameLog(PathBuf),

    #[error("parse error: line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("empty input: frame log contains no records")]
    EmptyInput,

    #[error("data error: line {line}: step {step} is lower than previous step {previous}")]
    NonMonotonicStep {
        line: usize,
        step: Step,
        previous: Step,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("encoder error: failed to spawn '{program}': {source}")]
    EncoderSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("encoder error: '{program}' exited with {status}: {stderr}")]
    EncoderFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
