// Run with: cargo fuzz run fuzz_comment_json
// Feeds arbitrary JSON bodies through comment payload validation.
#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use threadhub::domain::NewComment;
use unicode_segmentation::UnicodeSegmentation;

fuzz_target!(|data: &[u8]| {
    if let Ok(v) = serde_json::from_slice::<Value>(data) {
        let text = v.get("text").and_then(|s| s.as_str()).unwrap_or("").to_string();
        let post_id = v.get("post_id").and_then(|s| s.as_str()).unwrap_or("").to_string();

        if let Ok(comment) = NewComment::new(text, post_id) {
            let stored = comment.text.as_ref();
            assert!(!stored.trim().is_empty());
            assert!(stored.graphemes(true).count() <= 1000);
        }
    }
});
