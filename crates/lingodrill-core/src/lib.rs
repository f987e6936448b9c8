//! lingodrill-core — Test generation, grading, and quiz engines.
//!
//! This crate defines the content data model, turns raw API payloads into
//! it, builds weighted composite tests, grades them, and runs the
//! interactive quiz modes and study drills on top.

pub mod driver;
pub mod drills;
pub mod error;
pub mod generator;
pub mod grader;
pub mod mode;
pub mod model;
pub mod normalize;
pub mod quiz;
pub mod reading;
pub mod session;
pub mod timer;
pub mod traits;
