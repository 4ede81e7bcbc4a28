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
 * Nesting Tracker
 *
 * Both the encoder and the decoder need a bounded stack of "container I am currently inside"
 * frames; neither can use `Vec` in a `no_std` build, so both are fixed-size arrays of
 * `MAX_NESTING_DEPTH` frames. The encode side additionally carries the back-patch-by-memmove
 * protocol this lineage's `EncodeContext`/`context_start_common`/`context_finalize_common` used for
 * a single (non-nested) array or map, generalized here into a stack so arrays and maps can nest.
 **************************************************************************************************/
use crate::constants::{MAX_ARRAY_ITEMS, MAX_NESTING_DEPTH, MT_ARRAY, MT_BSTR, MT_MAP, MT_SIMPLE};
use crate::error::CBORError;
use crate::head;
use crate::outbuf::OutBuf;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

const STACK_SIZE: usize = MAX_NESTING_DEPTH as usize;

/// What kind of container a frame on the encode-side nesting stack represents.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameKind {
    Array,
    Map,
    /// A byte string wrapping a nested, fully self-contained CBOR item (spec §4.4 `bstr_wrap`).
    Bstr,
}

impl FrameKind {
    fn major(self) -> u8 {
        match self {
            FrameKind::Array => MT_ARRAY,
            FrameKind::Map => MT_MAP,
            FrameKind::Bstr => MT_BSTR,
        }
    }
}

#[derive(Copy, Clone)]
struct EncodeFrame {
    kind: FrameKind,
    /// Position of the (not yet known width) head byte.
    head_pos: usize,
    /// Items added since `open` (for a map, this counts both labels and values; for a `Bstr`
    /// frame this is unused, the byte count comes from the cursor position instead).
    items: u64,
}

/// Encode-side nesting stack. One frame per currently open array, map or bstr-wrap.
pub struct EncodeNesting {
    frames: [EncodeFrame; STACK_SIZE],
    depth: u8,
    max_depth: u8,
}

impl EncodeNesting {
    pub fn new(max_depth: u8) -> Self {
        EncodeNesting {
            frames: [EncodeFrame { kind: FrameKind::Array, head_pos: 0, items: 0 }; STACK_SIZE],
            depth: 0,
            max_depth: max_depth.min(MAX_NESTING_DEPTH),
        }
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Reserve the (as yet unknown width) head byte for a new container and push a frame.
    #[cfg_attr(feature = "trace", trace)]
    pub fn open(&mut self, out: &mut OutBuf, kind: FrameKind) -> Result<(), CBORError> {
        if self.depth >= self.max_depth {
            return Err(CBORError::ArrayNestingTooDeep);
        }
        let head_pos = out.tell();
        out.poke(0, 0);
        out.advance(1);
        self.frames[self.depth as usize] = EncodeFrame { kind, head_pos, items: 0 };
        self.depth += 1;
        Ok(())
    }

    /// Record that one more item (half of a map pair counts as one item here) was added to the
    /// innermost open container, if any.
    #[cfg_attr(feature = "trace", trace)]
    pub fn note_item(&mut self) -> Result<(), CBORError> {
        if self.depth == 0 {
            return Ok(());
        }
        let f = &mut self.frames[self.depth as usize - 1];
        f.items += 1;
        if f.items > 2 * MAX_ARRAY_ITEMS {
            return Err(CBORError::ArrayTooLong);
        }
        Ok(())
    }

    /// The kind of the innermost open container, if any.
    pub fn innermost_kind(&self) -> Option<FrameKind> {
        if self.depth == 0 {
            None
        } else {
            Some(self.frames[self.depth as usize - 1].kind)
        }
    }

    /// Finalize the innermost open container: go back and write its minimal-width head now the
    /// item/pair/byte count is known, shifting its already-written content if the head grew.
    /// Returns the count written into the head (items for an array, pairs for a map, content byte
    /// length for a `Bstr` wrap) so callers such as `bstr_wrap_close` can locate the content span.
    #[cfg_attr(feature = "trace", trace)]
    pub fn close(&mut self, out: &mut OutBuf, kind: FrameKind) -> Result<u64, CBORError> {
        if self.depth == 0 {
            return Err(CBORError::TooManyCloses);
        }
        let f = self.frames[self.depth as usize - 1];
        if f.kind != kind {
            return Err(CBORError::CloseMismatch);
        }
        if kind == FrameKind::Map && f.items % 2 != 0 {
            return Err(CBORError::ArrayOrMapStillOpen);
        }

        let content_start = f.head_pos + 1;
        let content_end = out.tell();
        let content_len = content_end - content_start;

        let count = match kind {
            FrameKind::Array => f.items,
            FrameKind::Map => f.items / 2,
            FrameKind::Bstr => content_len as u64,
        };
        if kind != FrameKind::Bstr && count > MAX_ARRAY_ITEMS {
            return Err(CBORError::ArrayTooLong);
        }
        let width = head::head_width(count);

        if width > 1 {
            out.shift_right(content_start, f.head_pos + width, content_len);
        }
        out.seek(f.head_pos);
        head::encode_head(out, kind.major(), count);
        out.seek(f.head_pos + width + content_len);

        self.depth -= 1;
        Ok(count)
    }

    /// Open an indefinite-length array or map: a single AI-31 byte, no back-patching needed.
    #[cfg_attr(feature = "trace", trace)]
    pub fn open_indefinite(&mut self, out: &mut OutBuf, kind: FrameKind) -> Result<(), CBORError> {
        if kind == FrameKind::Bstr {
            return Err(CBORError::Unsupported);
        }
        if self.depth >= self.max_depth {
            return Err(CBORError::ArrayNestingTooDeep);
        }
        head::encode_head_indefinite(out, kind.major());
        self.frames[self.depth as usize] = EncodeFrame { kind, head_pos: usize::MAX, items: 0 };
        self.depth += 1;
        Ok(())
    }

    /// Close an indefinite-length array or map by writing a `break`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn close_indefinite(&mut self, out: &mut OutBuf, kind: FrameKind) -> Result<(), CBORError> {
        if self.depth == 0 {
            return Err(CBORError::TooManyCloses);
        }
        let f = self.frames[self.depth as usize - 1];
        if f.kind != kind || f.head_pos != usize::MAX {
            return Err(CBORError::CloseMismatch);
        }
        if kind == FrameKind::Map && f.items % 2 != 0 {
            return Err(CBORError::ArrayOrMapStillOpen);
        }
        head::encode_head_indefinite(out, MT_SIMPLE);
        self.depth -= 1;
        Ok(())
    }
}

#[derive(Copy, Clone)]
struct DecodeFrame {
    is_map: bool,
    /// `None` for an indefinite-length container, terminated by `break` instead.
    remaining: Option<u64>,
    seen: u64,
}

/// Decode-side nesting stack, one frame per container the traversal is currently inside.
///
/// `Copy`/`Clone` so `spiffy` can snapshot the whole stack before entering a map and restore it
/// verbatim on `exit_map`/`rewind_map`, without the base decoder needing any notion of "map mode".
#[derive(Copy, Clone)]
pub struct DecodeNesting {
    frames: [DecodeFrame; STACK_SIZE],
    depth: u8,
    max_depth: u8,
}

impl DecodeNesting {
    pub fn new(max_depth: u8) -> Self {
        DecodeNesting {
            frames: [DecodeFrame { is_map: false, remaining: Some(0), seen: 0 }; STACK_SIZE],
            depth: 0,
            max_depth: max_depth.min(MAX_NESTING_DEPTH),
        }
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.depth
    }

    #[cfg_attr(feature = "trace", trace)]
    pub fn push(&mut self, is_map: bool, count: Option<u64>) -> Result<(), CBORError> {
        if self.depth >= self.max_depth {
            return Err(CBORError::ArrayNestingTooDeep);
        }
        if let Some(n) = count {
            if n > MAX_ARRAY_ITEMS {
                return Err(CBORError::ArrayTooLong);
            }
        }
        self.frames[self.depth as usize] = DecodeFrame { is_map, remaining: count, seen: 0 };
        self.depth += 1;
        Ok(())
    }

    /// Record that one child item (one label or value for a map) has been consumed from the
    /// innermost open container.
    pub fn note_item(&mut self) {
        if self.depth > 0 {
            self.frames[self.depth as usize - 1].seen += 1;
        }
    }

    /// `true` if the innermost open container has produced every item its declared (definite)
    /// length promised. Always `false` for an indefinite-length container; that one closes only
    /// when `break` is read.
    pub fn current_complete(&self) -> bool {
        match self.depth {
            0 => true,
            d => match self.frames[d as usize - 1].remaining {
                Some(n) => self.frames[d as usize - 1].seen >= n,
                None => false,
            },
        }
    }

    pub fn current_is_map(&self) -> Option<bool> {
        if self.depth == 0 {
            None
        } else {
            Some(self.frames[self.depth as usize - 1].is_map)
        }
    }

    pub fn current_is_indefinite(&self) -> bool {
        self.depth > 0 && self.frames[self.depth as usize - 1].remaining.is_none()
    }

    /// Pop the innermost frame, either because its declared length was satisfied or because a
    /// `break` closed an indefinite-length container.
    #[cfg_attr(feature = "trace", trace)]
    pub fn pop(&mut self) -> Result<(), CBORError> {
        if self.depth == 0 {
            return Err(CBORError::BadBreak);
        }
        self.depth -= 1;
        Ok(())
    }
}
