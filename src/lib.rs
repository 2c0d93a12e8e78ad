pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LambdaConfig, TomlConfig};

pub use adapters::http::ReqwestFetcher;
pub use crate::core::handler::{ApiRequest, ApiResponse, LatestVideosHandler};
pub use utils::error::{FeedError, Result};
