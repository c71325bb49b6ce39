#![forbid(unsafe_code)]

pub mod build;
pub mod cli;
pub mod extract;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod manifest;
pub mod markdown;
pub mod nav;
pub mod sink;
pub mod slug;
