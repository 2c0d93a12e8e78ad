pub mod extractor;
pub mod handler;
pub mod patterns;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{ChannelId, ChannelReference, FeedEntry, Resolution};
pub use crate::domain::ports::{ConfigProvider, FetchedPage, HttpFetcher};
pub use crate::utils::error::Result;
