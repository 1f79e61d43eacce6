//! Filesystem utilities for neosapiens.
//!
//! Config files and prompt files are written atomically so a crashed or
//! interrupted run never leaves a half-written file for the next one to read.

mod atomic;

pub use atomic::atomic_write;
