//! Utilities shared by the dashsync binaries.

pub mod logger;
