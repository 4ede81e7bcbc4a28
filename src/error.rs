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
 * qcbor-core Error API
 **************************************************************************************************/
use std::result;

#[cfg(any(feature = "full", test))]
use thiserror::Error;

/// An alias for Result<T, CBORError> used throughout this crate.
pub type Result<T> = result::Result<T, CBORError>;

/// `CBORError` is the single error type returned by the encoder, the decoder and the `spiffy`
/// auxiliary layer. There is no separate "success" variant: success is `Ok(())` / `Ok(item)`.
#[cfg_attr(any(feature="full", test), derive(Copy, Clone, Error, Debug))]
#[cfg_attr(all(not(feature="full"), not(test)), derive(Copy, Clone, Debug))]
pub enum CBORError {
    /// The output buffer does not have room for the next item. Sticky on the encoder.
    #[cfg_attr(any(feature="full", test), error("buffer too small for the next item"))]
    BufferTooSmall,
    /// Opening one more container would exceed the configured (or hard-capped) nesting depth.
    #[cfg_attr(any(feature="full", test), error("array/map nesting is too deep"))]
    ArrayNestingTooDeep,
    /// A single array or map accumulated more than the maximum permitted number of entries.
    #[cfg_attr(any(feature="full", test), error("array or map has too many items"))]
    ArrayTooLong,
    /// `close_array`/`close_map`/`bstr_wrap_close` with no matching open container.
    #[cfg_attr(any(feature="full", test), error("close with no corresponding open"))]
    TooManyCloses,
    /// Additional-info 28/29/30 encountered, or another reserved/unsupported wire feature.
    #[cfg_attr(any(feature="full", test), error("unsupported CBOR feature"))]
    Unsupported,
    /// The input buffer ran out of bytes before the current item could be fully parsed.
    #[cfg_attr(any(feature="full", test), error("hit end of input before item was complete"))]
    HitEnd,
    /// The input or output buffer exceeds the maximum size this core supports.
    #[cfg_attr(any(feature="full", test), error("buffer exceeds the maximum supported size"))]
    BufferTooLarge,
    /// A simple value falls in the reserved range, or was otherwise malformed.
    #[cfg_attr(any(feature="full", test), error("simple value is reserved or malformed"))]
    InvalidSimple,
    /// A decoded major-1 value's magnitude does not fit in `i64`.
    #[cfg_attr(any(feature="full", test), error("integer value overflows i64"))]
    IntOverflow,
    /// A map label (key) was not one of the types permitted by the decode mode.
    #[cfg_attr(any(feature="full", test), error("map label has an unsupported or disallowed type"))]
    MapLabelType,
    /// `encoder.finish()`/`decoder.finish()` called with an array or map still open.
    #[cfg_attr(any(feature="full", test), error("array or map was never closed"))]
    ArrayOrMapStillOpen,
    /// Byte 0xF8 with additional-info 24 but the following byte is itself in 0..=31.
    #[cfg_attr(any(feature="full", test), error("simple value encoding is malformed"))]
    BadSimple,
    /// Tag-1 (epoch date) applied to a double whose magnitude overflows `i64` seconds.
    #[cfg_attr(any(feature="full", test), error("date/epoch value overflows"))]
    DateOverflow,
    /// Input bytes do not form well-formed CBOR.
    #[cfg_attr(any(feature="full", test), error("input is not well-formed CBOR"))]
    InvalidCBOR,
    /// Two or more tags applied to the same item reclassify it in mutually conflicting ways.
    #[cfg_attr(any(feature="full", test), error("conflicting or unsupported tag combination"))]
    BadOptTag,
    /// `decoder.finish()` found bytes remaining after the top-level item(s).
    #[cfg_attr(any(feature="full", test), error("extra bytes after the decoded item(s)"))]
    ExtraBytes,
    /// `close_array`/`close_map` major type does not match the currently open container.
    #[cfg_attr(any(feature="full", test), error("close does not match the open container's type"))]
    CloseMismatch,
    /// An indefinite-length string chunk was not a definite-length string of the same major type.
    #[cfg_attr(any(feature="full", test), error("indefinite-length string chunk is not well-formed"))]
    IndefiniteStringChunk,
    /// Indefinite-length string aggregation was requested but no allocator was configured.
    #[cfg_attr(any(feature="full", test), error("no string allocator configured"))]
    NoStringAllocator,
    /// The configured string allocator returned failure (allocate or realloc call).
    #[cfg_attr(any(feature="full", test), error("string allocator failed to allocate"))]
    StringAllocate,
    /// An aggregated indefinite-length string exceeded the allocator's or decoder's size limit.
    #[cfg_attr(any(feature="full", test), error("aggregated string is too long"))]
    StringTooLong,
    /// `get_next` called with no more items available at the current nesting level.
    #[cfg_attr(any(feature="full", test), error("no more items at this nesting level"))]
    NoMoreItems,
    /// A `break` (0xFF) appeared where it did not correspond to an open indefinite container.
    #[cfg_attr(any(feature="full", test), error("break does not match an open indefinite container"))]
    BadBreak,
    /// Major type 7 additional-info 24 encoded a value in 0..=31, which must use in-head encoding.
    #[cfg_attr(any(feature="full", test), error("major type 7 one-byte encoding is malformed"))]
    BadTypeSeven,
    /// `spiffy` map search found the same label more than once while scanning a map.
    #[cfg_attr(any(feature="full", test), error("duplicate label found while searching a map"))]
    DuplicateLabel,
    /// The decoded item's type did not match what the caller (or `spiffy`) expected.
    #[cfg_attr(any(feature="full", test), error("item has an unexpected type"))]
    UnexpectedType,
    /// `spiffy` search did not find the requested label in the current map.
    #[cfg_attr(any(feature="full", test), error("requested label was not found"))]
    NotFound,
}
