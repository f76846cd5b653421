//! Built-in email transformations applied before dispatch.
//!
//! Each transformer runs in the pipeline between message assembly and
//! delivery. Currently the only built-in is the branded HTML layout
//! wrapper.

pub mod html_layout;

pub use html_layout::*;
