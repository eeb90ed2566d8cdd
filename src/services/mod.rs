pub mod config;
pub mod core;
pub mod fs_utils;
pub mod import;
pub mod matcher;
pub mod roster;
