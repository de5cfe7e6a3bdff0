//! Core wordlens library (text engine, transforms, statistics, config).

pub mod clipboard;
pub mod config;
pub mod engine;
pub mod text;
pub mod timer;

pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use engine::{EngineOptions, TextEngine};
pub use text::{TextStats, TransformKind};
pub use timer::{ManualTimer, Timer, TokioTimer};
