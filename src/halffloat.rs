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
 * Half precision float conversion
 *
 * The wire format and conversion semantics are delegated entirely to the `half` crate, the same
 * crate this lineage's `float` feature wraps for `CBOR::Float16`. This module just fixes the
 * exact-round-trip contract the codec promises: encoding a half value and decoding it back always
 * reproduces the original bit pattern, including for NaN payloads and both zeros.
 **************************************************************************************************/
#![cfg(feature = "float")]

use half::f16;

/// Decode a half-precision value from its big-endian wire bytes.
#[inline]
pub fn from_be_bytes(bytes: [u8; 2]) -> f16 {
    f16::from_be_bytes(bytes)
}

/// Encode a half-precision value to its big-endian wire bytes.
#[inline]
pub fn to_be_bytes(v: f16) -> [u8; 2] {
    v.to_be_bytes()
}

/// Widen a half-precision value to `f64`, the representation `Value::Float16` is paired with when
/// a caller asks for a lossless numeric comparison rather than the exact half bit pattern.
#[inline]
pub fn to_f64(v: f16) -> f64 {
    v.to_f64()
}
