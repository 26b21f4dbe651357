use crate::docker::ImageTool;
use crate::error::{Result, TaggerError};
use std::collections::HashSet;
use std::sync::Mutex;

/// Image tool that records calls instead of talking to a daemon
pub struct RecordingImageTool {
    calls: Mutex<Vec<String>>,
    published: HashSet<String>,
    failing: HashSet<String>,
}

impl RecordingImageTool {
    pub fn new() -> Self {
        RecordingImageTool {
            calls: Mutex::new(Vec::new()),
            published: HashSet::new(),
            failing: HashSet::new(),
        }
    }

    /// Pretend the registry already holds this image reference
    pub fn with_published(mut self, image: impl Into<String>) -> Self {
        self.published.insert(image.into());
        self
    }

    /// Make any tag or push of this image reference fail
    pub fn failing_on(mut self, image: impl Into<String>) -> Self {
        self.failing.insert(image.into());
        self
    }

    /// Recorded calls, e.g. "tag repo:1.0 repo:1" or "push repo:1"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check(&self, image: &str) -> Result<()> {
        if self.failing.contains(image) {
            return Err(TaggerError::command(format!("simulated failure for {}", image)));
        }
        Ok(())
    }
}

impl Default for RecordingImageTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageTool for RecordingImageTool {
    fn tag(&self, source: &str, target: &str) -> Result<()> {
        self.record(format!("tag {} {}", source, target));
        self.check(target)
    }

    fn push(&self, image: &str) -> Result<()> {
        self.record(format!("push {}", image));
        self.check(image)
    }

    fn exists(&self, image: &str) -> Result<bool> {
        self.record(format!("exists {}", image));
        Ok(self.published.contains(image))
    }
}
