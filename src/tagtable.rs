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
 * Tag bit table
 *
 * `Item::tag_bits` packs a `u64` with one bit per tag number the decoder can recognize quickly
 * without scanning `Item::tags`. The low 48 bits are reserved for the built-in tags in
 * `constants::tags::BUILT_IN`; the high 16 bits are available for tags a caller registers at
 * decoder construction time, so an application's own tag numbers get the same fast-path treatment.
 **************************************************************************************************/
use crate::constants::tags::BUILT_IN;
use crate::error::CBORError;

const CALLER_SLOTS: usize = 16;
const CALLER_BIT_BASE: u8 = 48;

/// Maps tag numbers to bit positions in `Item::tag_bits`: the first 48 bits for built-in tags,
/// the top 16 for tags an application registers.
#[derive(Debug, Clone)]
pub struct TagTable {
    caller_tags: [u64; CALLER_SLOTS],
    caller_count: u8,
}

impl TagTable {
    pub fn new() -> Self {
        TagTable { caller_tags: [0; CALLER_SLOTS], caller_count: 0 }
    }

    /// Register a caller-defined tag number, reserving it the next free high bit. Returns the bit
    /// index assigned. Fails with `Unsupported` once all 16 caller slots are used.
    pub fn register(&mut self, tag: u64) -> Result<u8, CBORError> {
        if let Some(bit) = self.bit_for(tag) {
            return Ok(bit);
        }
        if self.caller_count as usize >= CALLER_SLOTS {
            return Err(CBORError::Unsupported);
        }
        let bit = CALLER_BIT_BASE + self.caller_count;
        self.caller_tags[self.caller_count as usize] = tag;
        self.caller_count += 1;
        Ok(bit)
    }

    /// The bit position assigned to `tag`, whether built-in or previously registered, if any.
    pub fn bit_for(&self, tag: u64) -> Option<u8> {
        if let Some(i) = BUILT_IN.iter().position(|&t| t == tag) {
            return Some(i as u8);
        }
        self.caller_tags[..self.caller_count as usize]
            .iter()
            .position(|&t| t == tag)
            .map(|i| CALLER_BIT_BASE + i as u8)
    }

    /// Fold `tag` into `tag_bits` if it is recognized (built-in or registered); a no-op otherwise.
    pub fn mark(&self, tag_bits: &mut u64, tag: u64) {
        if let Some(bit) = self.bit_for(tag) {
            *tag_bits |= 1u64 << bit;
        }
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::new()
    }
}
