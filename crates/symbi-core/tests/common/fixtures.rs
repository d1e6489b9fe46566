//! Test fixtures for integration tests.

use symbi::{ArtifactSubmission, RequestContext};

pub const DEFAULT_TENANT: &str = "integration";

const FILLER: [&str; 12] = [
    "river", "stone", "lantern", "orbit", "meadow", "signal", "harbor", "quartz", "willow",
    "ember", "canyon", "prairie",
];

/// Sentences that hit the trust, reality and canvas vocabularies.
const RICH_SENTENCES: [&str; 6] = [
    "We verify every claim and cite the source as evidence before we confirm it.",
    "The scope has clear boundaries and limits, and we cannot go outside them.",
    "Our goal is to explain the method because the system data must align.",
    "Security and privacy protect users, and consent reduces the risk.",
    "Together we share feedback, and you choose which option to decide on.",
    "Honestly, a specific example from experience shows a new insight and pattern.",
];

#[derive(Debug, Clone)]
pub struct ArtifactBuilder {
    filename: String,
    topic: String,
    words: usize,
    rich: bool,
    html: bool,
}

impl Default for ArtifactBuilder {
    fn default() -> Self {
        Self {
            filename: "artifact.txt".to_string(),
            topic: "baseline".to_string(),
            words: 500,
            rich: false,
            html: false,
        }
    }
}

impl ArtifactBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(mut self, name: &str) -> Self {
        self.filename = name.to_string();
        self
    }

    /// Distinct topics produce distinct fingerprints.
    pub fn topic(mut self, topic: &str) -> Self {
        self.topic = topic.to_string();
        self
    }

    /// Approximate countable word total (exact for plain filler).
    pub fn words(mut self, words: usize) -> Self {
        self.words = words;
        self
    }

    pub fn keyword_rich(mut self) -> Self {
        self.rich = true;
        self
    }

    /// Wraps the text in a chat-export page with sidebar and header chrome.
    pub fn html(mut self) -> Self {
        self.html = true;
        self
    }

    pub fn body(&self) -> String {
        let mut words = vec![self.topic.clone()];
        if self.rich {
            let mut i = 0;
            while words.len() < self.words {
                words.extend(
                    RICH_SENTENCES[i % RICH_SENTENCES.len()]
                        .split_whitespace()
                        .map(str::to_string),
                );
                i += 1;
            }
        } else {
            words.extend((1..self.words).map(|i| FILLER[i % FILLER.len()].to_string()));
        }
        words.join(" ")
    }

    pub fn content(&self) -> String {
        let body = self.body();
        if !self.html {
            return body;
        }
        format!(
            r#"<!DOCTYPE html>
<html>
<head><title>Chat export</title><style>.msg {{ margin: 0; }}</style></head>
<body>
<nav class="sidebar-nav">New chat History Settings Upgrade plan</nav>
<header class="app-header">Workspace title and account menu</header>
<div class="conversation"><p>{body}</p></div>
<footer class="page-footer">Terms Privacy Cookies</footer>
<script>window.analytics = {{ track: true }};</script>
</body>
</html>"#
        )
    }

    pub fn build(&self) -> ArtifactSubmission {
        ArtifactSubmission::new(self.filename.clone(), self.content())
    }
}

pub fn tenant_ctx() -> RequestContext {
    RequestContext {
        tenant_id: DEFAULT_TENANT.to_string(),
        ..RequestContext::default()
    }
}
