//! The submission-processing engine and its collaborators.
//!
//! `streak` and `grader` are pure; `progress` and `lessons` read/write
//! through any `ConnectionTrait`; `submission` orchestrates one submission
//! inside a caller-managed transaction.

pub mod grader;
pub mod lessons;
pub mod progress;
pub mod streak;
pub mod submission;
