//! Tool management and execution framework for kuona
//!
//! This crate provides a framework for defining and executing tools: named
//! operations that take JSON parameters and return JSON results. The engine
//! exposes its single-event, bulk and backtest operations through it.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::Tool;
