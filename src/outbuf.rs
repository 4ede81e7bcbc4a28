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
 * Output cursor
 *
 * `OutBuf` is the encoder's only point of contact with the caller's buffer. It never panics on
 * overflow: once a write would run past the end of the buffer it latches `BufferTooSmall` and
 * every subsequent write becomes a no-op, so the encoder can keep issuing `Add*`/`Open`/`Close`
 * calls unconditionally and check the sticky error once at the end.
 **************************************************************************************************/
use crate::constants::MAX_BUFFER_SIZE;
use crate::error::CBORError;
use crate::utils::within;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Either a caller-owned backing slice, or no backing at all: "size-calculation mode", in which
/// every write succeeds without being stored and the cursor still ends up at the length the real
/// encode would have produced.
#[derive(Debug)]
enum Backing<'buf> {
    Real(&'buf mut [u8]),
    SizeOnly,
}

#[derive(Debug)]
pub struct OutBuf<'buf> {
    bytes: Backing<'buf>,
    /// Write cursor: number of bytes committed so far.
    index: usize,
    /// Sticky error. Once set, every further operation is a no-op.
    error: Option<CBORError>,
}

impl<'buf> OutBuf<'buf> {
    #[cfg_attr(feature = "trace", trace)]
    pub fn new(bytes: &'buf mut [u8]) -> Result<Self, CBORError> {
        if bytes.len() as u64 > MAX_BUFFER_SIZE {
            return Err(CBORError::BufferTooLarge);
        }
        Ok(OutBuf { bytes: Backing::Real(bytes), index: 0, error: None })
    }

    /// A cursor with no backing storage at all: every write succeeds without being stored, so
    /// running an encode program against this cursor computes the length it would have produced.
    #[cfg_attr(feature = "trace", trace)]
    pub fn new_size_only() -> Self {
        OutBuf { bytes: Backing::SizeOnly, index: 0, error: None }
    }

    /// Current write position (number of committed bytes).
    #[inline]
    pub fn tell(&self) -> usize {
        self.index
    }

    /// The sticky error, if any operation has failed so far.
    #[inline]
    pub fn error(&self) -> Option<CBORError> {
        self.error
    }

    /// Latch a sticky error if none is set yet. Exposed to the nesting tracker and encoder so
    /// they can report a contract violation (e.g. a mismatched close) through the same sticky
    /// path as a buffer overflow.
    #[inline]
    pub(crate) fn fail(&mut self, e: CBORError) {
        if self.error.is_none() {
            self.error = Some(e);
        }
    }

    /// Read back a span of already-committed bytes without consuming the cursor. Used by
    /// `bstr_wrap_close` to hand the caller the bytes it just wrapped. Fails on a
    /// size-calculation-mode cursor, since there is nothing to read back.
    pub(crate) fn slice(&self, start: usize, end: usize) -> Result<&[u8], CBORError> {
        match &self.bytes {
            Backing::Real(bytes) if end <= bytes.len() && start <= end => Ok(&bytes[start..end]),
            Backing::Real(_) => Err(CBORError::BufferTooSmall),
            Backing::SizeOnly => Err(CBORError::BufferTooLarge),
        }
    }

    /// `true` if a slice of `len` bytes can be written starting `offset` bytes past `index`.
    #[cfg_attr(feature = "trace", trace)]
    fn within(&self, offset: usize, len: usize) -> bool {
        match &self.bytes {
            Backing::Real(bytes) => within(bytes, self.index, offset + len),
            Backing::SizeOnly => true,
        }
    }

    /// Write a single byte `offset` bytes past the cursor, without advancing it.
    #[cfg_attr(feature = "trace", trace)]
    pub fn poke(&mut self, offset: usize, val: u8) {
        if self.error.is_some() {
            return;
        }
        if !self.within(offset, 1) {
            self.fail(CBORError::BufferTooSmall);
            return;
        }
        if let Backing::Real(bytes) = &mut self.bytes {
            bytes[self.index + offset] = val;
        }
    }

    /// Write `src` starting `offset` bytes past the cursor, without advancing it.
    #[cfg_attr(feature = "trace", trace)]
    pub fn poke_slice(&mut self, offset: usize, src: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if !self.within(offset, src.len()) {
            self.fail(CBORError::BufferTooSmall);
            return;
        }
        if let Backing::Real(bytes) = &mut self.bytes {
            bytes[self.index + offset..self.index + offset + src.len()].copy_from_slice(src);
        }
    }

    /// Advance the cursor by `len` bytes previously written with `poke`/`poke_slice`.
    #[inline]
    #[cfg_attr(feature = "trace", trace)]
    pub fn advance(&mut self, len: usize) {
        if self.error.is_none() {
            self.index += len;
        }
    }

    /// Move the cursor to an absolute position. Used only by the nesting tracker to rewind to a
    /// container's head byte for back-patching.
    #[inline]
    pub(crate) fn seek(&mut self, index: usize) {
        if self.error.is_none() {
            self.index = index;
        }
    }

    /// Shift `len` already-written bytes starting at `src` up to `dst` (`src < dst`), making room
    /// for a container head that grew once its item/pair count became known.
    #[cfg_attr(feature = "trace", trace)]
    pub(crate) fn shift_right(&mut self, src: usize, dst: usize, len: usize) {
        if self.error.is_some() || len == 0 {
            return;
        }
        if src >= dst {
            self.fail(CBORError::InvalidCBOR);
            return;
        }
        match &mut self.bytes {
            Backing::Real(bytes) => {
                if within(bytes, dst, len) {
                    for i in (0..len).rev() {
                        bytes[dst + i] = bytes[src + i];
                    }
                } else {
                    self.fail(CBORError::BufferTooSmall);
                }
            }
            Backing::SizeOnly => {}
        }
    }

    /// The bytes committed so far, or the sticky error if one occurred. Fails with
    /// `BufferTooLarge` if called on a size-calculation-mode cursor.
    pub fn finish(self) -> Result<&'buf [u8], CBORError> {
        match self.error {
            Some(e) => Err(e),
            None => match self.bytes {
                Backing::Real(bytes) => Ok(&bytes[..self.index]),
                Backing::SizeOnly => Err(CBORError::BufferTooLarge),
            },
        }
    }

    /// The length the encode program run on this cursor would have produced, ignoring the sticky
    /// error. Used by `finish_get_size` on both real and size-calculation-mode cursors.
    pub fn finish_get_size(self) -> Result<usize, CBORError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.index),
        }
    }
}
