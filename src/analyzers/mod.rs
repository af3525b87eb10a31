//! Peer-assessment scoring pipeline.
//!
//! This module detects students from the survey header row, averages the
//! ratings each one received from their peers, centres those averages on a
//! target score, and gathers the written justifications.

pub mod aggregate;
pub mod analyzer;
pub mod comments;
pub mod header;
pub mod normalize;
pub mod types;
pub mod utility;
