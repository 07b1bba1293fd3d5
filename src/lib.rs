// Library target exists so integration tests can drive the practice loop.
// The binary entry point is main.rs; this file re-declares the module tree.

pub mod app;
pub mod config;
pub mod input;
pub mod keyboard;
pub mod practice;
pub mod ui;
