use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, error};

/// Extracts the text of every page, each followed by a newline.
///
/// `pdf-extract` can panic on malformed fonts, so the call runs under
/// `catch_unwind`. Errors and panics both yield an empty string.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    let pages = match catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    })) {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            error!("Error extracting PDF text: {e}");
            return String::new();
        }
        Err(_panic) => {
            error!("Error extracting PDF text: parser panicked on malformed input");
            return String::new();
        }
    };

    debug!("Extracted {} PDF page(s)", pages.len());

    let mut text = String::new();
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }
    text
}
