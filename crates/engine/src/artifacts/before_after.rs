// ABOUTME: Before/after exemplars for titles, descriptions and tags.
// ABOUTME: One example per kind, taken from the first item that needs it.

use serde::Serialize;

use super::{SHORT_DESCRIPTION_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
use crate::modules::AuditContext;
use crate::text::{char_len, truncate_chars, words, EXAMPLE_TAG_STOP_WORDS};

const EXAMPLE_TAGS: usize = 10;
const SHORTENED_TITLE_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeforeAfterExample {
    #[serde(rename = "type")]
    pub kind: String,
    pub video_id: String,
    pub video_url: String,
    pub before: String,
    pub after: String,
    pub why_better: String,
    pub impact: String,
}

pub fn before_after_examples(ctx: &AuditContext<'_>) -> Vec<BeforeAfterExample> {
    let channel_title = &ctx.channel.title;
    let mut examples = Vec::new();

    let off_length = ctx.items.iter().find(|d| {
        let len = char_len(&d.item.title);
        len < TITLE_MIN_CHARS || len > TITLE_MAX_CHARS
    });
    if let Some(d) = off_length {
        let title = &d.item.title;
        let before_len = char_len(title);
        let after = if before_len < TITLE_MIN_CHARS {
            format!("{} | {} Exclusive", title, channel_title)
        } else {
            format!("{}...", truncate_chars(title, SHORTENED_TITLE_CHARS))
        };
        examples.push(BeforeAfterExample {
            kind: "Title Optimization".to_string(),
            video_id: d.item.id.clone(),
            video_url: ctx.video_url(&d.item.id),
            before: title.clone(),
            why_better: format!(
                "Optimal length (60-70 chars), includes brand, avoids truncation. Before: {} chars, After: {} chars",
                before_len,
                char_len(&after)
            ),
            after,
            impact: "Better click-through rate in search results".to_string(),
        });
    }

    let sparse = ctx
        .items
        .iter()
        .find(|d| char_len(&d.item.description) < SHORT_DESCRIPTION_CHARS);
    if let Some(d) = sparse {
        let before = truncate_chars(&d.item.description, SHORT_DESCRIPTION_CHARS);
        let after = format!(
            "{title}\n\n\
             Watch the full video to see [main topic]. In this video, we cover:\n\
             - Key point 1\n\
             - Key point 2\n\
             - Key point 3\n\n\
             Subscribe to {channel} for more content!\n\n\
             Video URL: {url}\n\
             #hashtag1 #hashtag2",
            title = d.item.title,
            channel = channel_title,
            url = ctx.video_url(&d.item.id),
        );
        examples.push(BeforeAfterExample {
            kind: "Description Optimization".to_string(),
            video_id: d.item.id.clone(),
            video_url: ctx.video_url(&d.item.id),
            before,
            after,
            why_better: "Includes keywords in first 150 chars, bullet points for scannability, CTA, hashtags"
                .to_string(),
            impact: "Better SEO and viewer engagement".to_string(),
        });
    }

    if let Some(d) = ctx.items.iter().find(|d| d.item.tags.is_empty()) {
        let mut tags: Vec<String> = words(&d.item.title, EXAMPLE_TAG_STOP_WORDS)
            .into_iter()
            .take(EXAMPLE_TAGS)
            .collect();
        tags.push(channel_title.to_lowercase());
        tags.push("brand name".to_string());
        tags.push("category".to_string());
        examples.push(BeforeAfterExample {
            kind: "Tags Optimization".to_string(),
            video_id: d.item.id.clone(),
            video_url: ctx.video_url(&d.item.id),
            before: "(no tags)".to_string(),
            after: tags.join(", "),
            why_better: "Mix of specific keywords + brand tags. 8-12 tags is optimal.".to_string(),
            impact: "Helps YouTube understand content and recommend to right audience".to_string(),
        });
    }

    examples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive_items;
    use crate::models::{Channel, Item};
    use crate::modules::testing::item;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn run(items: &[Item]) -> Vec<BeforeAfterExample> {
        let channel = Channel {
            title: "Bread Lab".to_string(),
            ..Default::default()
        };
        let derived = derive_items(items);
        let ctx = AuditContext::new(&channel, &derived, Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        before_after_examples(&ctx)
    }

    #[test]
    fn short_title_gets_brand_suffix() {
        let mut it = item("v1", "Rye loaf", "PT8M", 10, 0, 0);
        it.tags.clear();
        let examples = run(&[it]);
        let kinds: Vec<&str> = examples.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Title Optimization", "Description Optimization", "Tags Optimization"]);

        assert_eq!(examples[0].after, "Rye loaf | Bread Lab Exclusive");
        assert!(examples[0].why_better.ends_with("Before: 8 chars, After: 30 chars"));
        assert_eq!(examples[1].before, "");
        assert!(examples[1].after.starts_with("Rye loaf\n\nWatch the full video"));
        assert!(examples[1].after.contains("Subscribe to Bread Lab for more content!"));
        assert!(examples[1].after.ends_with("Video URL: https://youtube.com/watch?v=v1\n#hashtag1 #hashtag2"));
        assert_eq!(examples[2].after, "rye, loaf, bread lab, brand name, category");
    }

    #[test]
    fn long_title_is_cut_to_sixty_chars() {
        let title = "Sourdough ".repeat(8);
        assert_eq!(char_len(&title), 80);
        let mut it = item("v2", &title, "PT8M", 10, 0, 0);
        it.description = "x".repeat(150);
        let examples = run(&[it]);
        assert_eq!(examples.len(), 1);

        let example = &examples[0];
        assert_eq!(example.kind, "Title Optimization");
        assert_eq!(char_len(&example.after), 63);
        assert_eq!(example.after, format!("{}...", &title[..60]));
        assert!(example.why_better.ends_with("Before: 80 chars, After: 63 chars"));
    }

    #[test]
    fn sparse_description_before_keeps_first_hundred_chars() {
        let mut it = item("v3", "A carefully sized title that lands in the range", "PT8M", 10, 0, 0);
        it.description = "y".repeat(99);
        let examples = run(&[it]);
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].kind, "Description Optimization");
        assert_eq!(examples[0].before, "y".repeat(99));
    }

    #[test]
    fn nothing_to_show_for_well_formed_items() {
        let mut it = item("v1", "A carefully sized title that lands in the range", "PT8M", 10, 0, 0);
        it.description = "x".repeat(150);
        assert!(run(&[it]).is_empty());
    }
}
