//! Search results page extraction.
//!
//! The results table renders one book per row, but the cells are consumed as one
//! flat sequence: every book spans [`RECORD_LAYOUT`] consecutive cells. A
//! [`RecordAccumulator`] walks that sequence, filling one [`BookRecord`] per group
//! and sealing it when the layout wraps.

use crate::helpers::rewrite_mirror_link;
use crate::models::BookRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Result cells: every row after the header, columns 2 through 13 (ID and edit link skipped)
const RESULT_CELLS: &str =
    "body > table:nth-of-type(3) > tbody > tr:nth-child(n+2) > td:nth-child(n+2):nth-child(-n+13)";

/// "1234 files found" banner above the results table
const TOTAL_BANNER: &str = "body > table:nth-of-type(2) > tbody > tr > td:nth-child(1) > font";

/// What a result cell holds, by position within a book's group of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Author,
    /// Series, title, edition and ISBNs packed into one cell
    CombinedTitle,
    Publisher,
    Year,
    Pages,
    Language,
    Size,
    Extension,
    Mirror,
}

pub const RECORD_LAYOUT: [Role; 12] = [
    Role::Author,
    Role::CombinedTitle,
    Role::Publisher,
    Role::Year,
    Role::Pages,
    Role::Language,
    Role::Size,
    Role::Extension,
    Role::Mirror,
    Role::Mirror,
    Role::Mirror,
    Role::Mirror,
];

fn isbn_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"ISBN(?:[- ]?1[03])?:?\s*[0-9](?:[- ]?[0-9]){8,11}[- ]?[0-9Xx]")
            .expect("valid ISBN regex")
    })
}

fn edition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[0-9] ed\.\]").expect("valid edition regex"))
}

fn total_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9]+) (books|files)").expect("valid banner regex"))
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

/// Accumulates result cells into records.
///
/// State is the cursor into [`RECORD_LAYOUT`] plus the record being filled. When
/// the cursor has run past the layout the next cell first seals the current
/// record and resets the cursor to 0.
#[derive(Debug)]
pub struct RecordAccumulator<'m> {
    mirror: &'m str,
    cursor: usize,
    current: BookRecord,
    sealed: Vec<BookRecord>,
}

impl<'m> RecordAccumulator<'m> {
    pub fn new(mirror: &'m str) -> Self {
        Self {
            mirror,
            cursor: 0,
            current: BookRecord::default(),
            sealed: Vec::new(),
        }
    }

    /// Role the next pushed cell will fill
    pub fn next_role(&self) -> Role {
        RECORD_LAYOUT[self.cursor % RECORD_LAYOUT.len()]
    }

    pub fn push_cell(&mut self, cell: ElementRef<'_>) {
        if self.cursor >= RECORD_LAYOUT.len() {
            self.seal();
        }

        match RECORD_LAYOUT[self.cursor] {
            Role::Mirror => {
                if let Some(href) = anchor_children(cell).find_map(|a| a.value().attr("href")) {
                    self.current.mirrors.push(rewrite_mirror_link(href, self.mirror));
                }
            }
            Role::CombinedTitle => fill_combined_title(&mut self.current, cell),
            Role::Author => self.current.author = Some(cell_text(cell)),
            Role::Publisher => self.current.publisher = Some(cell_text(cell)),
            Role::Year => self.current.year = Some(cell_text(cell)),
            Role::Pages => self.current.pages = Some(cell_text(cell)),
            Role::Language => self.current.language = Some(cell_text(cell)),
            Role::Size => self.current.size = Some(cell_text(cell)),
            Role::Extension => self.current.extension = Some(cell_text(cell)),
        }

        self.cursor += 1;
    }

    fn seal(&mut self) {
        self.sealed.push(std::mem::take(&mut self.current));
        self.cursor = 0;
    }

    /// Seal the record in progress (even if partially filled) and return all records
    pub fn finish(mut self) -> Vec<BookRecord> {
        if self.cursor > 0 {
            self.seal();
        }
        self.sealed
    }
}

/// Extract every book record from a results page, in document order.
pub fn extract_records(doc: &Html, mirror: &str) -> Vec<BookRecord> {
    let cells = selector(RESULT_CELLS);
    let mut acc = RecordAccumulator::new(mirror);
    for cell in doc.select(&cells) {
        acc.push_cell(cell);
    }
    acc.finish()
}

/// Total result count from the page banner, 0 when the banner is missing or unreadable
pub fn parse_total_results(doc: &Html) -> usize {
    let banner = selector(TOTAL_BANNER);
    let Some(font) = doc.select(&banner).next() else {
        log::debug!("No result count banner on page");
        return 0;
    };
    let text = cell_text(font);
    total_regex()
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn fill_combined_title(record: &mut BookRecord, cell: ElementRef<'_>) {
    let Some(title) = anchor_children(cell).find_map(first_text_child) else {
        // No anchor to read from; keep whatever text the cell has
        record.title = Some(cell_text(cell));
        return;
    };
    record.title = Some(title);

    let spans = anchor_children(cell).flat_map(|a| {
        a.children()
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == "font")
    });

    for span in spans {
        let text = cell_text(span);
        if isbn_regex().is_match(&text) {
            record.isbn = Some(
                isbn_regex()
                    .find_iter(&text)
                    .map(|m| m.as_str().to_string())
                    .collect(),
            );
        } else if edition_regex().is_match(&text) {
            record.edition = Some(text);
        } else {
            record.series = Some(text);
        }
    }
}

fn anchor_children<'a>(cell: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    cell.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "a")
}

fn first_text_child(el: ElementRef<'_>) -> Option<String> {
    el.children()
        .find_map(|node| node.value().as_text().map(|t| String::from(&**t)))
}

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
