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
 * Input cursor
 *
 * `InBuf` is a forward-only read cursor over the caller's input slice, mirroring `OutBuf` on the
 * decode side. Every read is bounds-checked against the declared end of the slice with the same
 * `within()` helper the encoder uses; running past the end latches `HitEnd` rather than panicking.
 **************************************************************************************************/
use crate::constants::MAX_BUFFER_SIZE;
use crate::error::CBORError;
use crate::utils::within;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

#[derive(Debug)]
pub struct InBuf<'buf> {
    bytes: &'buf [u8],
    index: usize,
    error: Option<CBORError>,
}

impl<'buf> InBuf<'buf> {
    #[cfg_attr(feature = "trace", trace)]
    pub fn new(bytes: &'buf [u8]) -> Result<Self, CBORError> {
        if bytes.len() as u64 > MAX_BUFFER_SIZE {
            return Err(CBORError::BufferTooLarge);
        }
        Ok(InBuf { bytes, index: 0, error: None })
    }

    /// Current read position.
    #[inline]
    pub fn tell(&self) -> usize {
        self.index
    }

    /// Number of unread bytes remaining.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.index
    }

    #[inline]
    pub fn error(&self) -> Option<CBORError> {
        self.error
    }

    #[inline]
    fn fail(&mut self, e: CBORError) -> CBORError {
        if self.error.is_none() {
            self.error = Some(e);
        }
        e
    }

    /// Rewind or fast-forward the cursor to an absolute position. Used by the nesting tracker
    /// when a `break` closes an indefinite-length container and by `spiffy`'s `rewind_map`.
    pub(crate) fn seek(&mut self, index: usize) {
        self.index = index.min(self.bytes.len());
    }

    /// `true` if there is at least one more byte to read.
    pub fn has_more(&self) -> bool {
        self.index < self.bytes.len()
    }

    /// Peek at the byte at the cursor without consuming it.
    #[cfg_attr(feature = "trace", trace)]
    pub fn peek_byte(&mut self) -> Result<u8, CBORError> {
        if within(self.bytes, self.index, 1) {
            Ok(self.bytes[self.index])
        } else {
            Err(self.fail(CBORError::HitEnd))
        }
    }

    /// Consume and return the next byte.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_byte(&mut self) -> Result<u8, CBORError> {
        let b = self.peek_byte()?;
        self.index += 1;
        Ok(b)
    }

    /// Consume and return a big-endian `u16`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_u16(&mut self) -> Result<u16, CBORError> {
        let bytes = self.get_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Consume and return a big-endian `u32`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_u32(&mut self) -> Result<u32, CBORError> {
        let bytes = self.get_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Consume and return a big-endian `u64`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_u64(&mut self) -> Result<u64, CBORError> {
        let bytes = self.get_bytes(8)?;
        let mut a = [0u8; 8];
        a.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(a))
    }

    /// Consume and return `len` bytes as a borrowed slice into the input.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_bytes(&mut self, len: usize) -> Result<&'buf [u8], CBORError> {
        if within(self.bytes, self.index, len) {
            let s = &self.bytes[self.index..self.index + len];
            self.index += len;
            Ok(s)
        } else {
            Err(self.fail(CBORError::HitEnd))
        }
    }
}
