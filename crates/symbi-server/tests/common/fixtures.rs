//! Artifact text for end-to-end tests.

const FILLER: [&str; 10] = [
    "river", "stone", "lantern", "orbit", "meadow", "signal", "harbor", "quartz", "willow",
    "ember",
];

/// Plain text with exactly `words` countable words; distinct topics give distinct fingerprints.
pub fn artifact_text(topic: &str, words: usize) -> String {
    let mut out = vec![topic.to_string()];
    out.extend((1..words).map(|i| FILLER[i % FILLER.len()].to_string()));
    out.join(" ")
}

/// Same words wrapped in a chat-export page with navigation chrome and a script block.
pub fn html_artifact(topic: &str, words: usize) -> String {
    format!(
        r#"<html><head><title>Export</title></head><body>
<nav class="sidebar">New chat History Settings</nav>
<div class="conversation"><p>{}</p></div>
<script>console.log("loaded")</script>
</body></html>"#,
        artifact_text(topic, words)
    )
}
