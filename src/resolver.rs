// Page resolver - decides what a slug shows
//
// Zero records for a slug means the page is new and gets created on the
// spot. One record is the common case. More than one is a collision set,
// which renders as a disambiguation listing instead of page content.

use chrono::DateTime;
use regex::Regex;
use std::sync::Arc;

use crate::error::AppResult;
use crate::models::PageRecord;
use crate::render::{default_template, render_markdown};
use crate::store::PageStore;

const EDIT_LINK: &str = "<a href='#' id='editlink' class='fr'>Edit</a>";

// Source characters examined per excerpt, before stripping.
const EXCERPT_LEN: usize = 50;

/// What a slug resolved to: the record itself when the slug named exactly
/// one page (or a page was just created), `None` when a disambiguation
/// listing was rendered instead.
#[derive(Debug, Clone)]
pub struct ResolvedPage {
    pub record: Option<PageRecord>,
    pub rendered: String,
}

pub struct PageResolver {
    store: Arc<PageStore>,
    excerpt_strip: Regex,
}

impl PageResolver {
    pub fn new(store: Arc<PageStore>) -> Self {
        PageResolver {
            store,
            excerpt_strip: Regex::new("[^a-z A-Z0-9]+").unwrap(),
        }
    }

    /// Resolve a slug to displayable content. Creates the page when the
    /// slug has never been seen; read failures propagate and fail the
    /// whole request. No slug is special-cased.
    pub async fn resolve(&self, slug: &str) -> AppResult<ResolvedPage> {
        if !self.store.exists(slug).await? {
            let record = self.store.create(slug, &default_template(slug)).await?;
            tracing::info!(slug, id = %record.id, "created page");
            return Ok(self.single(record));
        }

        let mut records = self.store.lookup(slug).await?;
        if records.len() == 1 {
            return Ok(self.single(records.remove(0)));
        }

        let mut markdown = format!("# Found {} '{}'\n\n", records.len(), slug);
        for record in &records {
            markdown.push_str(&format!(
                "\n\n({}) [{}](/{}) *{}*.",
                format_timestamp(record.modified_at),
                record.id,
                record.id,
                self.excerpt(&record.content),
            ));
        }
        Ok(ResolvedPage {
            record: None,
            rendered: render_markdown(&markdown),
        })
    }

    fn single(&self, record: PageRecord) -> ResolvedPage {
        let markdown = format!("{}\n\n{}", EDIT_LINK, record.content);
        ResolvedPage {
            rendered: render_markdown(&markdown),
            record: Some(record),
        }
    }

    /// Short plain-text preview of a record: at most `EXCERPT_LEN` source
    /// characters, newlines flattened, everything outside letters, digits
    /// and spaces stripped, then trimmed.
    pub fn excerpt(&self, content: &str) -> String {
        let truncated: String = content.chars().take(EXCERPT_LEN).collect();
        let flattened = truncated.replace('\n', " ");
        self.excerpt_strip
            .replace_all(&flattened, "")
            .trim()
            .to_string()
    }
}

fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%a %b %-d %-I:%M%P %Y").to_string())
        .unwrap_or_else(|| millis.to_string())
}
