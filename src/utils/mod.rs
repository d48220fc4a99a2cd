//! Small shared helpers.

pub mod logutil;
