use crate::domain::ports::{FetchedPage, HttpFetcher};
use crate::utils::error::{FeedError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory fetcher that serves canned responses and records every URL it
/// was asked for. Unknown URLs fail like a refused connection.
#[derive(Clone, Default)]
pub struct RecordingFetcher {
    responses: Arc<Mutex<HashMap<String, FetchedPage>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            url.to_string(),
            FetchedPage {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetcher for RecordingFetcher {
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| {
                FeedError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("connection refused: {}", url),
                ))
            })
    }
}
