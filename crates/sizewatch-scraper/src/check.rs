//! One stock check: fetch, extract, flatten, match, interpret, fall back.

use std::future::Future;

use sizewatch_core::Verdict;

use crate::availability::Interpreter;
use crate::error::ScraperError;
use crate::extract::structured_blocks;
use crate::flatten::{flatten, FlatRecord};
use crate::page_text::visible_text;
use crate::size_records::match_size_records;
use crate::snippets::candidate_snippets;
use crate::text_fallback::text_fallback;

/// Source of raw page HTML.
pub trait DocumentLoader {
    /// Returns the full text body of `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// A verdict plus what the pipeline saw while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub verdict: Verdict,
    /// Structured blocks recovered from the page's scripts.
    pub structured_blocks: usize,
    /// Size records built from those blocks.
    pub size_records: usize,
    /// Visible-text excerpts around the size and stock phrases.
    pub snippets: Vec<String>,
}

/// Runs the full inference pipeline over `html` with the default interpreter.
#[must_use]
pub fn analyze_document(html: &str, size: &str) -> CheckOutcome {
    analyze_with(&Interpreter::default(), html, size)
}

fn analyze_with(interpreter: &Interpreter, html: &str, size: &str) -> CheckOutcome {
    let flat: Vec<FlatRecord> = structured_blocks(html)
        .map(|block| {
            let record = flatten(&block.value);
            tracing::debug!(source = ?block.source, fields = record.len(), "structured block");
            record
        })
        .collect();
    let records = match_size_records(&flat);

    let text = visible_text(html);
    let snippets = candidate_snippets(&text, size);

    let verdict = if let Some(verdict) = interpreter.interpret(&records, size) {
        tracing::info!(
            size,
            availability = %verdict.availability(),
            detail = verdict.detail(),
            "resolved from structured data"
        );
        verdict
    } else {
        let verdict = text_fallback(&text, size);
        if verdict.availability().is_conclusive() {
            tracing::info!(
                size,
                availability = %verdict.availability(),
                detail = verdict.detail(),
                "resolved from page text"
            );
        } else {
            tracing::warn!(size, "no stock signal in structured data or page text");
        }
        verdict
    };

    CheckOutcome {
        verdict,
        structured_blocks: flat.len(),
        size_records: records.len(),
        snippets,
    }
}

/// Fetches pages through a [`DocumentLoader`] and analyzes them.
pub struct StockChecker<L> {
    loader: L,
    interpreter: Interpreter,
}

impl<L: DocumentLoader> StockChecker<L> {
    pub fn new(loader: L) -> Self {
        Self::with_interpreter(loader, Interpreter::default())
    }

    pub fn with_interpreter(loader: L, interpreter: Interpreter) -> Self {
        Self {
            loader,
            interpreter,
        }
    }

    /// Checks `size` on the page at `url`.
    ///
    /// # Errors
    ///
    /// Propagates the loader's transport error; no verdict exists without a page.
    pub async fn check(&self, url: &str, size: &str) -> Result<CheckOutcome, ScraperError> {
        let html = self.loader.fetch(url).await?;
        Ok(analyze_with(&self.interpreter, &html, size))
    }
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
