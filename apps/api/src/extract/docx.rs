use std::panic::{catch_unwind, AssertUnwindSafe};

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use tracing::error;

/// Extracts each top-level body paragraph, one per line.
/// Tables, headers and footers are not read.
pub fn extract_docx_text(bytes: &[u8]) -> String {
    let docx = match catch_unwind(AssertUnwindSafe(|| docx_rs::read_docx(bytes))) {
        Ok(Ok(docx)) => docx,
        Ok(Err(e)) => {
            error!("Error extracting DOCX text: {e}");
            return String::new();
        }
        Err(_panic) => {
            error!("Error extracting DOCX text: reader panicked on malformed input");
            return String::new();
        }
    };

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            text.push_str(&paragraph_text(para));
            text.push('\n');
        }
    }
    text
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut out = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Tab(_) => out.push('\t'),
                    RunChild::Break(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
    }
    out
}
