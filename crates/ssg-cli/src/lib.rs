#![doc = "Command implementations behind the `ssg` binary."]

pub mod batch;
pub mod commands;
pub mod logging;
