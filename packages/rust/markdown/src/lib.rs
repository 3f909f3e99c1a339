//! Heading-aware section splitting for agent instruction files.
//!
//! Scans Markdown text line by line, tracking fenced code blocks, and cuts the
//! document into [`Section`]s at every ATX heading found outside a fence.
//! Not a CommonMark parser: lists, emphasis, links and tables pass through
//! untouched as section content.

mod scanner;

use tracing::debug;

use agentsmd_shared::{Section, SplitOptions};

use scanner::{FenceState, match_heading};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Split `raw` into sections with default options (preamble dropped).
pub fn split(raw: &str) -> Vec<Section> {
    split_with(raw, &SplitOptions::default())
}

/// Split `raw` into sections.
///
/// Runs in one pass over the lines:
/// 1. Fence marker lines flip the fence state
/// 2. Outside a fence, a heading closes the open section and opens a new one
/// 3. Every other line is buffered into the open section
/// 4. Lines before the first heading are dropped, or kept as a level-0
///    preamble section when `opts.keep_preamble` is set
///
/// Never fails; text without headings yields an empty result.
pub fn split_with(raw: &str, opts: &SplitOptions) -> Vec<Section> {
    let mut line_count = 0usize;
    let splitter = raw
        .lines()
        .inspect(|_| line_count += 1)
        .fold(Splitter::new(opts), Splitter::push_line);

    if splitter.fence == FenceState::Inside {
        debug!("input ended inside an unterminated code fence");
    }

    let sections = splitter.finish();
    debug!(lines = line_count, sections = sections.len(), "split complete");
    sections
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// A section whose heading has been seen but whose content is still growing.
struct OpenSection<'a> {
    title: &'a str,
    level: u8,
    lines: Vec<&'a str>,
}

impl OpenSection<'_> {
    fn close(self) -> Section {
        Section {
            title: self.title.to_string(),
            level: self.level,
            content: join_trimmed(&self.lines),
        }
    }
}

/// Fold state for one pass over the document.
struct Splitter<'a> {
    fence: FenceState,
    /// Pre-heading lines; `None` once a heading was seen or when not kept.
    preamble: Option<Vec<&'a str>>,
    open: Option<OpenSection<'a>>,
    sections: Vec<Section>,
}

impl<'a> Splitter<'a> {
    fn new(opts: &SplitOptions) -> Self {
        Self {
            fence: FenceState::default(),
            preamble: opts.keep_preamble.then(Vec::new),
            open: None,
            sections: Vec::new(),
        }
    }

    fn push_line(mut self, line: &'a str) -> Self {
        self.fence = self.fence.advance(line);

        let heading = if self.fence.allows_headings() {
            match_heading(line)
        } else {
            None
        };

        if let Some(heading) = heading {
            self.flush();
            self.open = Some(OpenSection {
                title: heading.title,
                level: heading.level,
                lines: Vec::new(),
            });
            return self;
        }

        if let Some(open) = self.open.as_mut() {
            open.lines.push(line);
        } else if let Some(preamble) = self.preamble.as_mut() {
            preamble.push(line);
        }

        self
    }

    /// Close the preamble and the open section, in that order.
    fn flush(&mut self) {
        if let Some(lines) = self.preamble.take() {
            let content = join_trimmed(&lines);
            if !content.is_empty() {
                self.sections.push(Section::preamble(content));
            }
        }
        if let Some(open) = self.open.take() {
            self.sections.push(open.close());
        }
    }

    fn finish(mut self) -> Vec<Section> {
        self.flush();
        self.sections
    }
}

fn join_trimmed(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
