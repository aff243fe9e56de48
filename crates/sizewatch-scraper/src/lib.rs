pub mod availability;
pub mod braces;
pub mod check;
pub mod client;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod notify;
pub mod page_text;
mod retry;
pub mod size_records;
pub mod snippets;
pub mod text_fallback;

pub use availability::{AvailabilityVocabulary, Interpreter};
pub use check::{analyze_document, CheckOutcome, DocumentLoader, StockChecker};
pub use client::PageClient;
pub use error::{NotifyError, ScraperError};
pub use notify::WebhookNotifier;
