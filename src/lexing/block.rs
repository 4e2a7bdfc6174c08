//! Block-comment state carried across lines
//!
//! The per-line scanner is pure in `(line, incoming state)`. [`LineStates`] records,
//! for every line of a buffer, the state it was entered with, the state it left
//! behind and the spans it produced. After an edit only the touched lines are
//! rescanned, then scanning continues line by line until a line is entered with the
//! same state as before the edit. From there on the cached results are still valid.
//!
//! ```text
//!   line   entry    exit
//!   0      Normal   Normal     /* a */
//!   1      Normal   Normal     code();
//!   2      Normal   Inside     /* b
//!   3      Inside   Normal     c */
//! ```

use super::line_scan::LineScanner;
use crate::buffer::{LineEdit, TextBuffer};
use crate::style::{StyleMap, StyledSpan};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Whether a line begins or ends inside an unclosed block comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockState {
    #[default]
    Normal,
    InsideBlockComment,
}

/// Per-line scan results for a whole buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStates {
    entries: Vec<BlockState>,
    exits: Vec<BlockState>,
    spans: Vec<Vec<StyledSpan>>,
}

impl LineStates {
    /// Scan every line of a buffer from the top
    pub fn scan_all(scanner: &LineScanner, buffer: &dyn TextBuffer) -> Self {
        let mut states = Self::default();
        let mut state = BlockState::Normal;
        for index in 0..buffer.line_count() {
            let line = buffer.line(index).unwrap_or("");
            let scan = scanner.scan_line(line, state);
            states.entries.push(state);
            states.exits.push(scan.exit);
            states.spans.push(scan.spans);
            state = scan.exit;
        }
        states
    }

    /// Scan every line of a plain string
    pub fn scan_text(scanner: &LineScanner, text: &str) -> Self {
        Self::scan_all(scanner, &crate::buffer::TextSnapshot::new(text))
    }

    pub fn line_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry_state(&self, line: usize) -> Option<BlockState> {
        self.entries.get(line).copied()
    }

    pub fn exit_state(&self, line: usize) -> Option<BlockState> {
        self.exits.get(line).copied()
    }

    pub fn spans(&self, line: usize) -> &[StyledSpan] {
        self.spans.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Collect the cached spans into a style map
    pub fn to_style_map(&self) -> StyleMap {
        let mut map = StyleMap::new();
        for (line, spans) in self.spans.iter().enumerate() {
            map.set_line(line, spans.clone());
        }
        map
    }

    /// Bring the cache up to date after an edit
    ///
    /// `buffer` is the content after the edit. Returns the range of lines that were
    /// rescanned. An edit that does not fit the cached line count falls back to a
    /// full rescan.
    pub fn apply_edit(
        &mut self,
        scanner: &LineScanner,
        edit: LineEdit,
        buffer: &dyn TextBuffer,
    ) -> Range<usize> {
        let old_count = self.line_count();
        let new_count = buffer.line_count();
        let consistent = edit.start_line + edit.removed <= old_count
            && old_count - edit.removed + edit.inserted == new_count;
        if !consistent {
            tracing::debug!(
                start = edit.start_line,
                removed = edit.removed,
                inserted = edit.inserted,
                old_count,
                new_count,
                "edit does not match cached lines, rescanning everything"
            );
            *self = Self::scan_all(scanner, buffer);
            return 0..new_count;
        }

        let start = edit.start_line;
        let removed = start..start + edit.removed;
        let fresh = edit.inserted;
        // Placeholder entries for inserted lines never match, so they are always scanned
        self.entries
            .splice(removed.clone(), std::iter::repeat(BlockState::Normal).take(fresh));
        self.exits
            .splice(removed.clone(), std::iter::repeat(BlockState::Normal).take(fresh));
        self.spans
            .splice(removed, std::iter::repeat_with(Vec::new).take(fresh));

        let forced_end = (start + fresh).max(start + 1).min(new_count);
        let mut state = match start {
            0 => BlockState::Normal,
            _ => self.exits[start - 1],
        };
        let mut line = start;
        while line < new_count {
            if line >= forced_end && self.entries[line] == state {
                break;
            }
            let scan = scanner.scan_line(buffer.line(line).unwrap_or(""), state);
            self.entries[line] = state;
            self.exits[line] = scan.exit;
            self.spans[line] = scan.spans;
            state = scan.exit;
            line += 1;
        }

        tracing::trace!(from = start, to = line, "rescanned lines");
        start..line
    }
}
