#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod feed;
pub mod fetch;
pub mod profile;
pub mod render;
pub mod resolver;
pub mod route;
pub mod video;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::run;
pub use resolver::{Resolution, Resolver, ResolverSettings, Source};
pub use video::VideoEntry;
