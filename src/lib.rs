//! Acompilator runner - streams compiler output with ANSI colors stripped.

pub mod compiler;
pub mod config;
pub mod controller;
pub mod display;
pub mod output;
pub mod supervisor;
