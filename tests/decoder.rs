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
 * Decoder behavior beyond the plain Appendix A vectors: tag reclassification, decode modes, and
 * indefinite-length string aggregation through a caller-supplied allocator.
 **************************************************************************************************/
use qcbor_core::decoder::{DecodeMode, Decoder};
use qcbor_core::encoder::Encoder;
use qcbor_core::error::CBORError;
use qcbor_core::types::{Mantissa, Value};

#[test]
fn tag_2_and_3_reclassify_bignums() {
    let mut buf = [0u8; 32];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_tag(2);
    enc.add_bytes(&[0x01, 0x00]);
    let encoded = enc.finish().unwrap().to_vec();

    let mut dec = Decoder::new(&encoded).unwrap();
    assert_eq!(dec.get_next().unwrap().value, Value::PosBignum(&[0x01, 0x00]));
    dec.finish().unwrap();

    let mut buf = [0u8; 32];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_tag(3);
    enc.add_bytes(&[0x01, 0x00]);
    let encoded = enc.finish().unwrap().to_vec();

    let mut dec = Decoder::new(&encoded).unwrap();
    assert_eq!(dec.get_next().unwrap().value, Value::NegBignum(&[0x01, 0x00]));
    dec.finish().unwrap();
}

#[test]
fn tag_4_decimal_fraction_consumes_its_two_element_array_as_one_item() {
    // 4([-2, 27315]) == 273.15
    let mut buf = [0u8; 32];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_tag(4);
    enc.open_array().add_i64(-2).add_i64(27315).close_array();
    let encoded = enc.finish().unwrap().to_vec();

    let mut dec = Decoder::new(&encoded).unwrap();
    let item = dec.get_next().unwrap();
    assert_eq!(
        item.value,
        Value::DecimalFraction { exponent: -2, mantissa: Mantissa::I64(27315) }
    );
    dec.finish().unwrap();
}

#[test]
fn tag_5_bigfloat_with_bignum_mantissa() {
    let mut buf = [0u8; 32];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_tag(5);
    enc.open_array();
    enc.add_i64(3);
    enc.add_tag(2);
    enc.add_bytes(&[0xff, 0xff]);
    enc.close_array();
    let encoded = enc.finish().unwrap().to_vec();

    let mut dec = Decoder::new(&encoded).unwrap();
    let item = dec.get_next().unwrap();
    assert_eq!(
        item.value,
        Value::Bigfloat { exponent: 3, mantissa: Mantissa::Big { negative: false, bytes: &[0xff, 0xff] } }
    );
    dec.finish().unwrap();
}

#[test]
fn decimal_fraction_with_wrong_array_length_is_bad_opt_tag() {
    let mut buf = [0u8; 16];
    let mut enc = Encoder::new(&mut buf).unwrap();
    enc.add_tag(4);
    enc.open_array().add_i64(1).add_i64(2).add_i64(3).close_array();
    let encoded = enc.finish().unwrap().to_vec();

    let mut dec = Decoder::new(&encoded).unwrap();
    assert!(matches!(dec.get_next(), Err(CBORError::BadOptTag)));
}

#[test]
fn map_as_array_mode_flattens_pairs_and_doubles_the_count() {
    // {1: true, 2: false}
    let bytes = [0xa2, 0x01, 0xf5, 0x02, 0xf4];
    let mut dec = Decoder::with_mode(&bytes, DecodeMode::MapAsArray).unwrap();

    let array = dec.get_next().unwrap();
    assert_eq!(array.value, Value::Array { count: Some(4) });

    let values: Vec<Value> = (0..4).map(|_| dec.get_next().unwrap().value).collect();
    assert_eq!(values, vec![Value::UInt(1), Value::True, Value::UInt(2), Value::False]);
    dec.finish().unwrap();
}

#[cfg(feature = "alloc")]
#[test]
fn indefinite_byte_string_aggregates_through_the_bump_allocator() {
    use qcbor_core::alloc_api::BumpAllocator;

    let bytes = [0x5f, 0x42, 0x01, 0x02, 0x43, 0x03, 0x04, 0x05, 0xff];
    let mut arena = [0u8; 8];
    let mut allocator = BumpAllocator::new(&mut arena);
    let mut dec = Decoder::new(&bytes).unwrap();
    dec.set_string_allocator(&mut allocator);

    let item = dec.get_next().unwrap();
    assert_eq!(item.value, Value::Bstr(&[0x01, 0x02, 0x03, 0x04, 0x05]));
    assert!(item.allocated);
    dec.finish().unwrap();
}

#[test]
fn caller_tag_list_registers_application_specific_tags() {
    // tag 1000 on a uint
    let bytes = [0xd9, 0x03, 0xe8, 0x01];
    let mut dec = Decoder::new(&bytes).unwrap();
    dec.set_caller_tag_list(&[1000]).unwrap();
    let item = dec.get_next().unwrap();
    assert_eq!(item.value, Value::UInt(1));
    assert!(item.has_tag(1000));
    dec.finish().unwrap();
}
