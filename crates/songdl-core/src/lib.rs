pub mod config;
pub mod logging;

pub mod batch;
pub mod downloader;
pub mod error;
pub mod info;
pub mod progress;
pub mod sources;
pub mod template;
pub mod tools;
pub mod url_model;
pub mod ytdlp;
