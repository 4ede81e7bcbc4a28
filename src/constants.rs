/***************************************************************************************************
 * Copyright (c) 2020-2022 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * qcbor-core wire-format constants
 *
 * Byte-level constants shared by the head codec, encoder and decoder. Kept in one place so that
 * the minimal-width rule (RFC 8949 section 3.9) is defined exactly once.
 **************************************************************************************************/
/// Additional Information bitmask (low 5 bits of the initial byte).
pub const AI_MASK: u8 = 0b000_11111;
/// Major Type bitmask (top 3 bits of the initial byte).
pub const MT_MASK: u8 = 0b111_00000;
/// Number of bits the major type is shifted left in the initial byte.
pub const MT_SHIFT: u8 = 5;

/// Major Type 0 (Positive integers)
pub const MT_UINT: u8 = 0;
/// Major Type 1 (Negative integers)
pub const MT_NINT: u8 = 1;
/// Major Type 2 (Byte Strings)
pub const MT_BSTR: u8 = 2;
/// Major Type 3 (Text Strings)
pub const MT_TSTR: u8 = 3;
/// Major Type 4 (Array)
pub const MT_ARRAY: u8 = 4;
/// Major Type 5 (Map)
pub const MT_MAP: u8 = 5;
/// Major Type 6 (Tag)
pub const MT_TAG: u8 = 6;
/// Major Type 7 (Floats, simple types, break)
pub const MT_SIMPLE: u8 = 7;

/// Largest value that fits directly in the additional-info bits.
pub const AI_DIRECT_MAX: u8 = 23;
/// Additional-info: one byte of argument follows.
pub const AI_ONE_BYTE: u8 = 24;
/// Additional-info: two bytes of argument follow.
pub const AI_TWO_BYTES: u8 = 25;
/// Additional-info: four bytes of argument follow.
pub const AI_FOUR_BYTES: u8 = 26;
/// Additional-info: eight bytes of argument follow.
pub const AI_EIGHT_BYTES: u8 = 27;
/// Additional-info 28, 29, 30 are reserved and never emitted or accepted.
pub const AI_RESERVED_LO: u8 = 28;
pub const AI_RESERVED_HI: u8 = 30;
/// Additional-info 31 signals an indefinite-length container/string, or (major 7) `break`.
pub const AI_INDEFINITE: u8 = 31;

/// Major 7, additional info values for the true/false/null/undefined simple values.
pub const SIMPLE_FALSE: u8 = 20;
pub const SIMPLE_TRUE: u8 = 21;
pub const SIMPLE_NULL: u8 = 22;
pub const SIMPLE_UNDEFINED: u8 = 23;
/// Major 7 + AI 25/26/27: half/single/double precision float payloads.
pub const FLOAT_HALF: u8 = 25;
pub const FLOAT_SINGLE: u8 = 26;
pub const FLOAT_DOUBLE: u8 = 27;
/// Major 7 + AI 31: `break` for indefinite-length containers/strings.
pub const BREAK: u8 = 31;

/// Maximum number of items permitted in an array, or pairs in a map (spec §3 invariant).
pub const MAX_ARRAY_ITEMS: u64 = 65_535;

/// Default maximum container nesting depth, matching the teacher's embedded-friendly default.
pub const DEFAULT_MAX_NESTING_DEPTH: u8 = 10;
/// Hard upper bound on nesting depth; the nesting stacks are fixed-size arrays of this length, so
/// this also bounds `EncodeNesting`'s and `DecodeNesting`'s stack storage.
pub const MAX_NESTING_DEPTH: u8 = 32;

/// Maximum input/output buffer size the core supports (internal offsets are 32-bit).
pub const MAX_BUFFER_SIZE: u64 = 0x1_0000_0000;

/// Built-in CBOR tag numbers the decoder recognizes and reclassifies (spec §6).
pub mod tags {
    pub const DATE_STRING: u64 = 0;
    pub const DATE_EPOCH: u64 = 1;
    pub const POS_BIGNUM: u64 = 2;
    pub const NEG_BIGNUM: u64 = 3;
    pub const DECIMAL_FRACTION: u64 = 4;
    pub const BIGFLOAT: u64 = 5;
    pub const BASE64URL_EXPECTED: u64 = 21;
    pub const BASE64_EXPECTED: u64 = 22;
    pub const BASE16_EXPECTED: u64 = 23;
    pub const ENCODED_CBOR: u64 = 24;
    pub const URI: u64 = 32;
    pub const BASE64URL: u64 = 33;
    pub const BASE64: u64 = 34;
    pub const REGEX: u64 = 35;
    pub const MIME: u64 = 36;
    pub const UUID: u64 = 37;
    pub const SELF_DESCRIBE_CBOR: u64 = 55799;

    /// All built-in tag numbers the bit-table (`tagtable`) reserves a low bit for, in bit order.
    pub const BUILT_IN: [u64; 17] = [
        DATE_STRING,
        DATE_EPOCH,
        POS_BIGNUM,
        NEG_BIGNUM,
        DECIMAL_FRACTION,
        BIGFLOAT,
        BASE64URL_EXPECTED,
        BASE64_EXPECTED,
        BASE16_EXPECTED,
        ENCODED_CBOR,
        URI,
        BASE64URL,
        BASE64,
        REGEX,
        MIME,
        UUID,
        SELF_DESCRIBE_CBOR,
    ];
}

/// Module defining bitfield values for what types are allowed by the `spiffy` search layer's
/// type-wildcard matching. See [`crate::spiffy::MapQuery`].
#[cfg(feature = "combinators")]
pub mod allow {
    pub const NONE: u32 = 1;
    pub const UINT: u32 = 2;
    pub const NINT: u32 = 4;
    pub const BSTR: u32 = 8;
    pub const TSTR: u32 = 16;
    pub const ARRAY: u32 = 32;
    pub const MAP: u32 = 64;
    pub const TAG: u32 = 128;
    pub const FLOAT: u32 = 256;
    pub const SIMPLE: u32 = 512;
}
