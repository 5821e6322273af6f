//! Shared test utilities for photo-importer integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated test execution with temp directories
//! - `FakeTools`, a scripted stand-in for the metadata tool and DNG converter

pub mod fake_tools;
pub mod harness;

pub use fake_tools::{FakeTools, Invocation, CONVERTER, EXIFTOOL};
pub use harness::TestHarness;
