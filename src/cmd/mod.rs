pub mod config;
pub mod options;
pub mod submit;
