//! Chunked, deadline-bounded keyword scanning of a single text file.

pub mod chunk;
pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod source;
pub mod util;
