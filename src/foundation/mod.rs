//! Error types shared by every stage of the conversion.

pub mod error;
