/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
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
 * Test cases from RFC 8949 Appendix A, for encoding
 **************************************************************************************************/
use qcbor_core::encoder::Encoder;

fn encode_u64(buf: &mut [u8], value: u64) -> Vec<u8> {
    let mut enc = Encoder::new(buf).unwrap();
    enc.add_u64(value);
    enc.finish().unwrap().to_vec()
}

fn encode_i64(buf: &mut [u8], value: i64) -> Vec<u8> {
    let mut enc = Encoder::new(buf).unwrap();
    enc.add_i64(value);
    enc.finish().unwrap().to_vec()
}

#[test]
fn unsigned_integers_use_minimal_width_encoding() {
    let mut buf = [0u8; 16];
    assert_eq!(encode_u64(&mut buf, 0), &[0x00]);
    assert_eq!(encode_u64(&mut buf, 1), &[0x01]);
    assert_eq!(encode_u64(&mut buf, 10), &[0x0a]);
    assert_eq!(encode_u64(&mut buf, 23), &[0x17]);
    assert_eq!(encode_u64(&mut buf, 24), &[0x18, 0x18]);
    assert_eq!(encode_u64(&mut buf, 25), &[0x18, 0x19]);
    assert_eq!(encode_u64(&mut buf, 100), &[0x18, 0x64]);
    assert_eq!(encode_u64(&mut buf, 1000), &[0x19, 0x03, 0xe8]);
    assert_eq!(encode_u64(&mut buf, 1_000_000), &[0x1a, 0x00, 0x0f, 0x42, 0x40]);
    assert_eq!(
        encode_u64(&mut buf, 1_000_000_000_000),
        &[0x1b, 0x00, 0x00, 0x00, 0xe8, 0xd4, 0xa5, 0x10, 0x00]
    );
    assert_eq!(
        encode_u64(&mut buf, 18_446_744_073_709_551_615),
        &[0x1b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );
}

#[test]
fn negative_integers_use_minimal_width_encoding() {
    let mut buf = [0u8; 16];
    assert_eq!(encode_i64(&mut buf, -1), &[0x20]);
    assert_eq!(encode_i64(&mut buf, -10), &[0x29]);
    assert_eq!(encode_i64(&mut buf, -100), &[0x38, 0x63]);
    assert_eq!(encode_i64(&mut buf, -1000), &[0x39, 0x03, 0xe7]);
}

#[test]
fn simple_values() {
    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_bool(false);
    assert_eq!(enc.finish().unwrap(), &[0xf4]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_bool(true);
    assert_eq!(enc.finish().unwrap(), &[0xf5]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_null();
    assert_eq!(enc.finish().unwrap(), &[0xf6]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_undefined();
    assert_eq!(enc.finish().unwrap(), &[0xf7]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_simple(16);
    assert_eq!(enc.finish().unwrap(), &[0xf0]);
}

#[test]
fn byte_and_text_strings() {
    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_bytes(&[]);
    assert_eq!(enc.finish().unwrap(), &[0x40]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_bytes(&[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(enc.finish().unwrap(), &[0x44, 0x01, 0x02, 0x03, 0x04]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_text("");
    assert_eq!(enc.finish().unwrap(), &[0x60]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_text("a");
    assert_eq!(enc.finish().unwrap(), &[0x61, 0x61]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_text("IETF");
    assert_eq!(enc.finish().unwrap(), &[0x64, b'I', b'E', b'T', b'F']);
}

#[test]
fn arrays() {
    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.open_array().close_array();
    assert_eq!(enc.finish().unwrap(), &[0x80]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.open_array().add_u64(1).add_u64(2).add_u64(3).close_array();
    assert_eq!(enc.finish().unwrap(), &[0x83, 0x01, 0x02, 0x03]);

    let mut buf = [0u8; 32];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.open_array();
    enc.add_u64(1);
    enc.open_array().add_u64(2).add_u64(3).close_array();
    enc.open_array().add_u64(4).add_u64(5).close_array();
    enc.close_array();
    assert_eq!(enc.finish().unwrap(), &[0x83, 0x01, 0x82, 0x02, 0x03, 0x82, 0x04, 0x05]);
}

#[test]
fn maps() {
    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.open_map().close_map();
    assert_eq!(enc.finish().unwrap(), &[0xa0]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.open_map();
    enc.add_u64(1).add_u64(2);
    enc.add_u64(3).add_u64(4);
    enc.close_map();
    assert_eq!(enc.finish().unwrap(), &[0xa2, 0x01, 0x02, 0x03, 0x04]);

    let mut buf = [0u8; 32];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.open_map();
    enc.add_text("a").add_u64(1);
    enc.add_text("b");
    enc.open_array().add_u64(2).add_u64(3).close_array();
    enc.close_map();
    assert_eq!(
        enc.finish().unwrap(),
        &[0xa2, 0x61, b'a', 0x01, 0x61, b'b', 0x82, 0x02, 0x03]
    );
}

#[test]
fn indefinite_length_array_and_strings() {
    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.open_array_indefinite();
    enc.add_u64(1);
    enc.add_u64(2);
    enc.close_array_indefinite();
    assert_eq!(enc.finish().unwrap(), &[0x9f, 0x01, 0x02, 0xff]);

    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.open_array_indefinite();
    enc.close_array_indefinite();
    assert_eq!(enc.finish().unwrap(), &[0x9f, 0xff]);
}

#[test]
fn tag_0_date_string() {
    let mut buf = [0u8; 32];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_date_string("2013-03-21T20:04:00Z");
    assert_eq!(
        enc.finish().unwrap(),
        &[
            0xc0, 0x74, b'2', b'0', b'1', b'3', b'-', b'0', b'3', b'-', b'2', b'1', b'T', b'2',
            b'0', b':', b'0', b'4', b':', b'0', b'0', b'Z'
        ]
    );
}

#[test]
fn tag_1_epoch_date() {
    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_date_epoch(1_363_896_240);
    assert_eq!(enc.finish().unwrap(), &[0xc1, 0x1a, 0x51, 0x4b, 0x67, 0xb0]);
}
