use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use volfill::content::TextSource;
use volfill::FillError;
use walkdir::WalkDir;

/// Serves fixed bodies by URL; unknown URLs fail like a 404.
pub struct StaticSource {
    bodies: HashMap<String, String>,
}

impl StaticSource {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            bodies: pairs
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl TextSource for StaticSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FillError> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FillError::FetchFailure {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            })
    }
}

/// Every fetch fails.
pub struct OfflineSource;

#[async_trait]
impl TextSource for OfflineSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FillError> {
        Err(FillError::FetchFailure {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

/// Total bytes and regular file count under `root`.
pub fn tree_totals(root: &Path) -> (u64, usize) {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .fold((0, 0), |(bytes, count), entry| {
            let len = entry.metadata().map(|m| m.len()).unwrap_or(0);
            (bytes + len, count + 1)
        })
}

pub fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
