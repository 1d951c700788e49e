//! Pieces shared by the `limabar` entry point that do not depend on Lima.

pub mod config;
