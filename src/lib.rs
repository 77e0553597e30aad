#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod label;
pub mod notice;
pub mod panels;
pub mod renderer;
pub mod store;
pub mod tools;
pub mod util;
pub mod viewport;

pub use app::LabelerApp;
pub use command::Command;
pub use config::EditorConfig;
pub use context::EditorContext;
pub use error::{ConfigError, ExportError, LoadError, StoreError};
pub use export::{ExportAdapter, ExportFormat};
pub use label::{FontStyle, FontWeight, Label, LabelId, LabelPatch};
pub use store::LabelStore;
pub use tools::{DragTool, EditTool};
pub use viewport::Viewport;
