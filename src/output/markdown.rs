//! Markdown report generation
//!
//! This module renders the broken-link and keyword reports, each headed by
//! the run information.

use crate::crawler::Section;
use crate::output::records::{KeywordHit, OutputError, OutputResult, PageReport, RunInfo};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path`, replacing any existing file
pub fn write_report(path: &Path, content: &str) -> OutputResult<()> {
    let write = || -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    };

    write().map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Formats the broken-link report
///
/// Pages are listed in the order they were scanned. Pages without broken
/// links are omitted.
pub fn format_broken_links(run: &RunInfo, pages: &[PageReport]) -> OutputResult<String> {
    let mut md = String::new();

    writeln!(md, "# Broken Links\n")?;
    format_run_info(&mut md, run)?;

    let broken_pages: Vec<_> = pages.iter().filter(|p| !p.is_clean()).collect();
    let total: usize = broken_pages.iter().map(|p| p.broken.len()).sum();

    writeln!(
        md,
        "Found {} broken link(s) on {} page(s).\n",
        total,
        broken_pages.len()
    )?;

    for page in broken_pages {
        writeln!(md, "## {}\n", page_heading(&page.page_url, page.section))?;
        for link in &page.broken {
            writeln!(md, "- {} ({})", link.url, link.reason)?;
        }
        writeln!(md)?;
    }

    Ok(md)
}

/// Formats the keyword report
pub fn format_keyword_hits(
    run: &RunInfo,
    keyword: &str,
    hits: &[KeywordHit],
) -> OutputResult<String> {
    let mut md = String::new();

    writeln!(md, "# Keyword \"{}\"\n", keyword)?;
    format_run_info(&mut md, run)?;

    if hits.is_empty() {
        writeln!(md, "No pages mention {}.", keyword)?;
        return Ok(md);
    }

    for hit in hits {
        writeln!(md, "## {}\n", page_heading(&hit.page_url, hit.section))?;
        writeln!(md, "{}\n", sentence_count(hit.count, keyword))?;
    }

    Ok(md)
}

/// `"1 sentence with UA"`, `"3 sentences with UA"`
pub fn sentence_count(count: usize, keyword: &str) -> String {
    let noun = if count == 1 { "sentence" } else { "sentences" };
    format!("{} {} with {}", count, noun, keyword)
}

// The main section is implied; header and footer are called out since they
// share the root page URL.
fn page_heading(page_url: &str, section: Section) -> String {
    match section {
        Section::Main => page_url.to_string(),
        Section::Header | Section::Footer => format!("{} ({})", page_url, section),
    }
}

fn format_run_info(md: &mut String, run: &RunInfo) -> OutputResult<()> {
    writeln!(md, "- **Root**: {}", run.root)?;
    writeln!(md, "- **Started**: {}", run.started_at.to_rfc3339())?;
    writeln!(md, "- **Finished**: {}", run.finished_at.to_rfc3339())?;
    writeln!(md, "- **Duration**: {} seconds", run.duration_seconds())?;
    writeln!(md, "- **Outcome**: {}", run.outcome)?;
    if let Some(hash) = &run.config_hash {
        writeln!(md, "- **Config Hash**: {}", hash)?;
    }
    writeln!(md)?;
    Ok(())
}
