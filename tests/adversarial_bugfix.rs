/***************************************************************************************************
 * Copyright (c) 2020-2022 Qualcomm Innovation Center, Inc. All rights reserved.
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
 * Bugfix and adversarial-input test cases
 **************************************************************************************************/
use qcbor_core::decoder::{Decoder, DecodeMode};
use qcbor_core::encoder::Encoder;
use qcbor_core::error::CBORError;
use qcbor_core::types::Value;

/// The first entry in an array can itself be an array; this regressed once when the nesting
/// tracker's "is the current frame complete" check ran before the frame was actually pushed.
#[test]
fn encode_nested_array_first_item() {
    let mut buffer = [0u8; 64];
    let mut enc = Encoder::new(&mut buffer).unwrap();
    enc.open_array();
    enc.open_array().add_u64(1).add_u64(2).close_array();
    enc.open_array().add_u64(3).add_u64(4).close_array();
    enc.close_array();
    assert_eq!(enc.finish().unwrap(), &[0x82, 0x82, 0x01, 0x02, 0x82, 0x03, 0x04]);
}

/// A zero-length array as the first element of an outer array: the nesting tracker closes it in
/// the very same `get_next` call that opens it, before the outer array's second element is read.
#[test]
fn decode_leading_empty_array_closes_in_the_same_call() {
    // [[], 5]
    let bytes = [0x82, 0x80, 0x05];
    let mut dec = Decoder::new(&bytes).unwrap();

    let outer = dec.get_next().unwrap();
    assert_eq!(outer.value, Value::Array { count: Some(2) });

    let inner = dec.get_next().unwrap();
    assert_eq!(inner.value, Value::Array { count: Some(0) });
    assert_eq!(inner.nesting_level, 1);
    assert_eq!(inner.next_nesting_level, 1);

    let five = dec.get_next().unwrap();
    assert_eq!(five.value, Value::UInt(5));
    dec.finish().unwrap();
}

/// Same as above, but the empty container is indefinite-length: `break` is consumed by the same
/// `get_next` call that read the opening head.
#[test]
fn decode_indefinite_empty_array_closes_immediately() {
    let bytes = [0x9F, 0xFF];
    let mut dec = Decoder::new(&bytes).unwrap();
    let item = dec.get_next().unwrap();
    assert_eq!(item.value, Value::Array { count: None });
    assert_eq!(item.next_nesting_level, 0);
    dec.finish().unwrap();
}

/// A container-length header claiming more than the maximum permitted item count is rejected
/// before any attempt is made to read that many items.
#[test]
fn decode_oversized_array_header_is_rejected_up_front() {
    // Major 4, 4-byte argument = 65536 (one past MAX_ARRAY_ITEMS).
    let bytes = [0x9A, 0x00, 0x01, 0x00, 0x00];
    let mut dec = Decoder::new(&bytes).unwrap();
    assert!(matches!(dec.get_next(), Err(CBORError::ArrayTooLong)));
}

/// A lone `break` byte at the top level, with no open indefinite-length container to terminate.
#[test]
fn decode_unmatched_break_is_rejected() {
    let bytes = [0xFF];
    let mut dec = Decoder::new(&bytes).unwrap();
    assert!(matches!(dec.get_next(), Err(CBORError::BadBreak)));
}

/// An indefinite-length text string whose chunk is a byte string instead of a text string.
#[test]
fn decode_mismatched_indefinite_string_chunk_is_rejected() {
    let bytes = [0x7F, 0x41, 0x00, 0xFF];
    let mut dec = Decoder::new(&bytes).unwrap();
    assert!(matches!(dec.get_next(), Err(CBORError::IndefiniteStringChunk)));
}

/// Container nesting one level deeper than the configured maximum fails on the push that would
/// exceed it, not before.
#[test]
fn decode_nesting_deeper_than_max_depth_fails_on_the_excess_push() {
    // 11 one-element arrays nested inside each other, then a scalar. Default max depth is 10.
    let mut bytes = vec![0x81u8; 11];
    bytes.push(0x00);
    let mut dec = Decoder::new(&bytes).unwrap();

    for _ in 0..10 {
        assert!(matches!(dec.get_next().unwrap().value, Value::Array { count: Some(1) }));
    }
    assert!(matches!(dec.get_next(), Err(CBORError::ArrayNestingTooDeep)));
}

/// `close_array`/`close_map` with nothing open is rejected, not silently ignored.
#[test]
fn encode_close_with_nothing_open_is_rejected() {
    let mut buffer = [0u8; 16];
    let mut enc = Encoder::new(&mut buffer).unwrap();
    enc.close_array();
    assert!(matches!(enc.finish(), Err(CBORError::TooManyCloses)));
}

/// Writing past the end of a small output buffer sets the sticky error rather than panicking or
/// silently truncating.
#[test]
fn encode_into_undersized_buffer_is_rejected() {
    let mut buffer = [0u8; 1];
    let mut enc = Encoder::new(&mut buffer).unwrap();
    enc.add_u64(1000);
    assert!(matches!(enc.finish(), Err(CBORError::BufferTooSmall)));
}

/// The largest magnitude negative integer representable (`i64::MIN`) round-trips through the
/// `-1 - n` wire encoding without overflow.
#[test]
fn encode_decode_i64_min_round_trips() {
    let mut buffer = [0u8; 16];
    let mut enc = Encoder::new(&mut buffer).unwrap();
    enc.add_i64(i64::MIN);
    let encoded = enc.finish().unwrap().to_vec();

    let mut dec = Decoder::new(&encoded).unwrap();
    let item = dec.get_next().unwrap();
    assert_eq!(item.value, Value::NInt(i64::MAX as u64));
    dec.finish().unwrap();
}

/// `MapStringsOnly` mode still lets the map itself be read; only a non-text label is rejected.
#[test]
fn decode_map_strings_only_accepts_text_labels() {
    let bytes = [0xA1, 0x61, b'a', 0x01];
    let mut dec = Decoder::with_mode(&bytes, DecodeMode::MapStringsOnly).unwrap();
    assert_eq!(dec.get_next().unwrap().value, Value::Map { count: Some(1) });
    let entry = dec.get_next().unwrap();
    assert_eq!(entry.value, Value::UInt(1));
    dec.finish().unwrap();
}
