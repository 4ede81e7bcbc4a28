/***************************************************************************************************
 * Copyright (c) 2021-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * Spiffy decode: map-search auxiliary layer
 *
 * `Decoder::get_next` is a pure pre-order traversal with no notion of "inside a map". This module
 * builds map entry/exit and label search purely as a client of that traversal: a `MapMark` is a
 * snapshot of the nesting stack and input cursor taken the moment a map item is delivered, and
 * every operation here is expressed as "call `get_next` some number of times, then restore the
 * snapshot". The base decoder never needs to know a search is in progress.
 **************************************************************************************************/
use crate::decode::Decoder;
use crate::error::CBORError;
use crate::item::{Item, Label, Value};
use crate::nesting::DecodeNesting;
use crate::utils::Allowable;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Every data type, used as the default filter for the single-label convenience lookups.
fn any_type() -> Allowable {
    use crate::constants::allow::*;
    Allowable::new(NONE | UINT | NINT | BSTR | TSTR | ARRAY | MAP | TAG | FLOAT | SIMPLE)
}

/// A bookmark into an entered map, returned by [`enter_map`](Decoder::enter_map). Holds exactly
/// what is needed to resume the base traversal at the map's first entry, or to skip past whatever
/// of the map remains unread.
#[derive(Debug, Copy, Clone)]
pub struct MapMark {
    /// Nesting level of the map item itself; its direct entries live at `level + 1`.
    level: u8,
    /// Nesting stack as it stood with the map's frame freshly pushed, cursor at its first entry.
    entry_nesting: DecodeNesting,
    entry_cursor: usize,
}

/// One label to search for, paired with the value types that count as a match.
pub struct MapQuery<'q> {
    /// The label (key) to look for.
    pub label: Label<'q>,
    /// Value types a match against `label` is permitted to carry.
    pub allow: Allowable,
}

impl<'q> MapQuery<'q> {
    /// A query that matches `label` regardless of the value's type.
    pub fn any(label: Label<'q>) -> Self {
        MapQuery { label, allow: any_type() }
    }
}

impl<'buf, 'alloc> Decoder<'buf, 'alloc> {
    /// Begin a scoped traversal of `map_item`'s entries.
    ///
    /// Must be called with the `Item` this decoder's `get_next` most recently returned: the map's
    /// frame is then the innermost one on the nesting stack and the cursor sits right at its first
    /// entry, which is exactly the state this snapshots.
    #[cfg_attr(feature = "trace", trace)]
    pub fn enter_map(&mut self, map_item: &Item<'buf>) -> Result<MapMark, CBORError> {
        if !matches!(map_item.value, Value::Map { .. }) {
            return Err(CBORError::UnexpectedType);
        }
        Ok(MapMark {
            level: map_item.nesting_level,
            entry_nesting: *self.nesting(),
            entry_cursor: self.tell(),
        })
    }

    /// The map's next entry, or `None` once every entry (and any nested values) has been
    /// delivered. Never reads past the map's own boundary into the enclosing container.
    #[cfg_attr(feature = "trace", trace)]
    pub fn next_in_map(&mut self, mark: &MapMark) -> Result<Option<Item<'buf>>, CBORError> {
        if self.nesting().level() <= mark.level {
            return Ok(None);
        }
        Ok(Some(self.get_next()?))
    }

    /// Consume whatever of the map remains unread, leaving the cursor positioned right after it
    /// as if every entry had been read one at a time.
    #[cfg_attr(feature = "trace", trace)]
    pub fn exit_map(&mut self, mark: &MapMark) -> Result<(), CBORError> {
        while self.next_in_map(mark)?.is_some() {}
        Ok(())
    }

    /// Rewind to the map's first entry, so a fresh `next_in_map`/search pass can run again.
    #[cfg_attr(feature = "trace", trace)]
    pub fn rewind_map(&mut self, mark: &MapMark) {
        *self.nesting_mut() = mark.entry_nesting;
        self.seek(mark.entry_cursor);
    }

    /// Search the entered map for every label in `queries`, filling `results` with the matching
    /// items in the same order (`None` where no entry matched). Scans the whole map regardless of
    /// how many queries are satisfied early, so a label matched twice by the same query is
    /// reported as [`CBORError::DuplicateLabel`] rather than silently taking the first or last
    /// hit. Leaves the decoder positioned at the map's first entry either way, so repeated
    /// searches are idempotent with respect to the base cursor.
    ///
    /// `queries` and `results` are paired by index; entries in `queries` beyond `results.len()`
    /// (or vice versa) are ignored.
    #[cfg_attr(feature = "trace", trace)]
    pub fn search_map<'q>(
        &mut self,
        mark: &MapMark,
        queries: &[MapQuery<'q>],
        results: &mut [Option<Item<'buf>>],
    ) -> Result<(), CBORError> {
        for slot in results.iter_mut() {
            *slot = None;
        }
        self.rewind_map(mark);
        let outcome = self.scan_map_once(mark, queries, results);
        self.rewind_map(mark);
        outcome
    }

    fn scan_map_once<'q>(
        &mut self,
        mark: &MapMark,
        queries: &[MapQuery<'q>],
        results: &mut [Option<Item<'buf>>],
    ) -> Result<(), CBORError> {
        while let Some(item) = self.next_in_map(mark)? {
            let label = match &item.label {
                Some(label) => *label,
                None => continue,
            };
            for (query, slot) in queries.iter().zip(results.iter_mut()) {
                if query.label != label {
                    continue;
                }
                if !query.allow.permits(&item.value) {
                    return Err(CBORError::UnexpectedType);
                }
                if slot.is_some() {
                    return Err(CBORError::DuplicateLabel);
                }
                *slot = Some(item);
            }
        }
        Ok(())
    }

    /// Find the entry labeled with the integer `label` (a negative value is an `NInt` label).
    /// `NotFound` if the map has no such entry.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_item_in_map_n(&mut self, mark: &MapMark, label: i64) -> Result<Item<'buf>, CBORError> {
        let label = if label >= 0 { Label::UInt(label as u64) } else { Label::NInt((-1 - label) as u64) };
        let mut results = [None];
        self.search_map(mark, &[MapQuery::any(label)], &mut results)?;
        results[0].ok_or(CBORError::NotFound)
    }

    /// Find the entry labeled with the text string `label`. `NotFound` if the map has no such
    /// entry.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_item_in_map_sz(&mut self, mark: &MapMark, label: &str) -> Result<Item<'buf>, CBORError> {
        let mut results = [None];
        self.search_map(mark, &[MapQuery::any(Label::Tstr(label))], &mut results)?;
        results[0].ok_or(CBORError::NotFound)
    }
}
