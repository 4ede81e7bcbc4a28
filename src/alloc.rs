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
 * String allocator strategy
 *
 * Indefinite-length byte/text strings arrive on the wire as a sequence of definite-length chunks
 * that have to be concatenated before the caller can see them as a single `&[u8]`/`&str`. Since
 * this crate never allocates on its own, that concatenation target has to come from somewhere the
 * caller controls: a `StringAllocator`. The decoder calls it exactly once per aggregated string,
 * with the string's total length computed by a first pass over the chunk headers.
 **************************************************************************************************/
use crate::error::CBORError;

/// A place for the decoder to assemble an indefinite-length string's chunks into one contiguous
/// slice. Implementations hand out non-overlapping sub-slices of a buffer they own; they are never
/// asked to free an individual string; the whole allocator is simply dropped (or reset) by the
/// caller once the decoded items are no longer needed.
pub trait StringAllocator<'buf> {
    /// Return a fresh `len`-byte slice for the decoder to fill in. Fails with `StringAllocate` if
    /// the allocator has no room left.
    fn alloc(&mut self, len: usize) -> Result<&'buf mut [u8], CBORError>;
}

/// A built-in bump-arena allocator: hands out successive non-overlapping slices of a caller-owned
/// buffer and never reclaims space until the whole allocator is dropped. Adequate for the common
/// case of decoding one message into caller-owned storage and discarding it as a unit.
#[cfg(feature = "alloc")]
pub struct BumpAllocator<'buf> {
    remaining: Option<&'buf mut [u8]>,
}

#[cfg(feature = "alloc")]
impl<'buf> BumpAllocator<'buf> {
    pub fn new(arena: &'buf mut [u8]) -> Self {
        BumpAllocator { remaining: Some(arena) }
    }

    /// Bytes not yet handed out.
    pub fn available(&self) -> usize {
        self.remaining.as_ref().map_or(0, |r| r.len())
    }
}

#[cfg(feature = "alloc")]
impl<'buf> StringAllocator<'buf> for BumpAllocator<'buf> {
    fn alloc(&mut self, len: usize) -> Result<&'buf mut [u8], CBORError> {
        let arena = self.remaining.take().ok_or(CBORError::StringAllocate)?;
        if len > arena.len() {
            self.remaining = Some(arena);
            return Err(CBORError::StringAllocate);
        }
        let (head, tail) = arena.split_at_mut(len);
        self.remaining = Some(tail);
        Ok(head)
    }
}
