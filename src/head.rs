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
 * Type/Argument Head Codec
 *
 * Every CBOR item starts with an initial byte (3 bit major type, 5 bit additional info) optionally
 * followed by 1/2/4/8 bytes of argument. This module is the single place that rule is implemented,
 * on both the encode and decode side, so the RFC 8949 §3.9 minimal-encoding rule can't drift between
 * the two.
 **************************************************************************************************/
use crate::constants::*;
use crate::error::CBORError;
use crate::inbuf::InBuf;
use crate::outbuf::OutBuf;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// A decoded initial byte, plus its argument.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeadInfo {
    pub major: u8,
    /// The raw 5 bit additional-info field, preserved so callers can distinguish AI 31
    /// (indefinite-length / `break`) from a definite argument.
    pub ai: u8,
    /// The decoded argument. Meaningless when `ai == AI_INDEFINITE`.
    pub argument: u64,
}

impl HeadInfo {
    #[inline]
    pub fn is_indefinite(&self) -> bool {
        self.ai == AI_INDEFINITE
    }
}

/// Number of argument bytes needed to encode `argument` with RFC 8949 minimal-length encoding.
#[cfg_attr(feature = "trace", trace)]
pub fn argument_width(argument: u64) -> usize {
    match argument {
        0..=0x17 => 0,
        0x18..=0xff => 1,
        0x100..=0xffff => 2,
        0x1_0000..=0xffff_ffff => 4,
        _ => 8,
    }
}

/// Total size in bytes (initial byte plus argument) of the minimal-length head for `argument`.
#[inline]
pub fn head_width(argument: u64) -> usize {
    1 + argument_width(argument)
}

/// Write a minimal-length head for `major`/`argument` at the output cursor and advance it.
#[cfg_attr(feature = "trace", trace)]
pub fn encode_head(out: &mut OutBuf, major: u8, argument: u64) {
    let mt = major << MT_SHIFT;
    let bytes = argument.to_be_bytes();
    match argument_width(argument) {
        0 => {
            out.poke(0, mt | argument as u8);
            out.advance(1);
        }
        1 => {
            out.poke(0, mt | AI_ONE_BYTE);
            out.poke(1, bytes[7]);
            out.advance(2);
        }
        2 => {
            out.poke(0, mt | AI_TWO_BYTES);
            out.poke_slice(1, &bytes[6..=7]);
            out.advance(3);
        }
        4 => {
            out.poke(0, mt | AI_FOUR_BYTES);
            out.poke_slice(1, &bytes[4..=7]);
            out.advance(5);
        }
        _ => {
            out.poke(0, mt | AI_EIGHT_BYTES);
            out.poke_slice(1, &bytes[0..=7]);
            out.advance(9);
        }
    }
}

/// Write a single-byte head with additional-info 31: indefinite-length open, or (major 7) `break`.
#[cfg_attr(feature = "trace", trace)]
pub fn encode_head_indefinite(out: &mut OutBuf, major: u8) {
    out.poke(0, (major << MT_SHIFT) | AI_INDEFINITE);
    out.advance(1);
}

/// Read one head (initial byte, plus argument bytes if any) from the input cursor.
#[cfg_attr(feature = "trace", trace)]
pub fn decode_head(inp: &mut InBuf) -> Result<HeadInfo, CBORError> {
    let b = inp.get_byte()?;
    let major = (b & MT_MASK) >> MT_SHIFT;
    let ai = b & AI_MASK;
    let argument = match ai {
        0..=0x17 => ai as u64,
        AI_ONE_BYTE => inp.get_byte()? as u64,
        AI_TWO_BYTES => inp.get_u16()? as u64,
        AI_FOUR_BYTES => inp.get_u32()? as u64,
        AI_EIGHT_BYTES => inp.get_u64()?,
        AI_RESERVED_LO..=AI_RESERVED_HI => return Err(CBORError::Unsupported),
        _ => 0, // AI_INDEFINITE: caller interprets per major type
    };
    Ok(HeadInfo { major, ai, argument })
}
