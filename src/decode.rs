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
 * Streaming decoder
 *
 * `Decoder::get_next` performs a pre-order traversal of a CBOR input buffer, returning one fully
 * decorated `Item` per call: head decode, indefinite-length string aggregation, tag recognition and
 * reclassification, and (inside a map) label/value pairing, all folded into a single pass so the
 * caller never has to track nesting by hand. `nesting_level`/`next_nesting_level` on each item let a
 * caller reconstruct the tree without maintaining a stack of their own.
 **************************************************************************************************/
use crate::alloc::StringAllocator;
use crate::constants::*;
use crate::error::CBORError;
use crate::head::{self, HeadInfo};
use crate::inbuf::InBuf;
use crate::item::{Item, Label, Mantissa, TagList, Value};
use crate::nesting::DecodeNesting;
use crate::tagtable::TagTable;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

const BREAK_BYTE: u8 = (MT_SIMPLE << MT_SHIFT) | AI_INDEFINITE;

/// Controls how `get_next` surfaces map entries (spec §4.9).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecodeMode {
    /// Map labels may be any of the supported label types; entries are returned as one item with
    /// `label` set.
    Normal,
    /// Like `Normal`, but a non-text-string label is rejected with `MapLabelType`.
    MapStringsOnly,
    /// Maps are not aggregated into label/value pairs at all: a map is surfaced as an array whose
    /// count is twice the pair count, and its members are delivered as plain alternating items.
    MapAsArray,
}

/// A data item read from the wire before tag/label post-processing, or one of the two transient
/// outcomes (`break`, a bare tag) that never reach the caller as an `Item` on their own.
enum Raw<'buf> {
    Value(Value<'buf>),
    /// Major 2 or 3 with an indefinite-length head; the caller aggregates the following chunks.
    StringStart(u8),
    /// Major 6: a tag number, to be folded into the next real item.
    Tag(u64),
    /// Major 7, additional-info 31.
    Break,
}

struct Decoded<'buf> {
    value: Value<'buf>,
    tag_bits: u64,
    tags: TagList,
    allocated: bool,
}

/// Streaming CBOR decoder over a borrowed input buffer.
pub struct Decoder<'buf, 'alloc> {
    inp: InBuf<'buf>,
    nesting: DecodeNesting,
    mode: DecodeMode,
    tag_table: TagTable,
    allocator: Option<&'alloc mut (dyn StringAllocator<'buf> + 'alloc)>,
}

impl<'buf, 'alloc> Decoder<'buf, 'alloc> {
    pub fn new(bytes: &'buf [u8]) -> Result<Self, CBORError> {
        Self::with_mode(bytes, DecodeMode::Normal)
    }

    pub fn with_mode(bytes: &'buf [u8], mode: DecodeMode) -> Result<Self, CBORError> {
        Self::with_max_depth(bytes, mode, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub fn with_max_depth(bytes: &'buf [u8], mode: DecodeMode, max_depth: u8) -> Result<Self, CBORError> {
        Ok(Decoder {
            inp: InBuf::new(bytes)?,
            nesting: DecodeNesting::new(max_depth),
            mode,
            tag_table: TagTable::new(),
            allocator: None,
        })
    }

    /// Install the string allocator used to aggregate indefinite-length byte/text strings. Without
    /// one, an indefinite-length string fails with `NoStringAllocator`.
    pub fn set_string_allocator(&mut self, allocator: &'alloc mut (dyn StringAllocator<'buf> + 'alloc)) {
        self.allocator = Some(allocator);
    }

    /// Register application-specific tag numbers so they get a fast `tag_bits` slot the same way
    /// the built-in tags do. Fails with `Unsupported` past 16 caller tags.
    pub fn set_caller_tag_list(&mut self, tags: &[u64]) -> Result<(), CBORError> {
        for &t in tags {
            self.tag_table.register(t)?;
        }
        Ok(())
    }

    /// Current read position in the input buffer. Used by `spiffy` to snapshot/restore a traversal
    /// position around `enter_map`/`exit_map`/`rewind_map`.
    pub(crate) fn tell(&self) -> usize {
        self.inp.tell()
    }

    pub(crate) fn seek(&mut self, index: usize) {
        self.inp.seek(index);
    }

    pub(crate) fn nesting(&self) -> &DecodeNesting {
        &self.nesting
    }

    pub(crate) fn nesting_mut(&mut self) -> &mut DecodeNesting {
        &mut self.nesting
    }

    /// `true` iff the traversal is back at the top level with no bytes left unread.
    pub fn finish(&self) -> Result<(), CBORError> {
        if self.nesting.level() != 0 {
            return Err(CBORError::ArrayOrMapStillOpen);
        }
        if self.inp.has_more() {
            return Err(CBORError::ExtraBytes);
        }
        Ok(())
    }

    /// Read the next item of the pre-order traversal (spec §4.10).
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_next(&mut self) -> Result<Item<'buf>, CBORError> {
        if self.nesting.level() == 0 && !self.inp.has_more() {
            return Err(CBORError::NoMoreItems);
        }

        let level = self.nesting.level();
        let in_map = self.mode != DecodeMode::MapAsArray && self.nesting.current_is_map() == Some(true);

        let mut item = if in_map { self.next_map_entry()? } else { self.next_plain_item()? };
        item.nesting_level = level;

        if self.mode == DecodeMode::MapAsArray {
            if let Value::Map { count } = item.value {
                item.value = Value::Array { count: count.map(|c| c.saturating_mul(2)) };
            }
        }

        match item.value {
            Value::Array { count } => self.nesting.push(false, count)?,
            Value::Map { count } => self.nesting.push(true, count)?,
            _ => self.nesting.note_item(),
        }

        loop {
            if self.nesting.level() == 0 {
                break;
            }
            if self.nesting.current_complete() {
                self.nesting.pop()?;
                self.nesting.note_item();
                continue;
            }
            if self.nesting.current_is_indefinite()
                && self.inp.has_more()
                && self.inp.peek_byte()? == BREAK_BYTE
            {
                self.inp.get_byte()?;
                self.nesting.pop()?;
                self.nesting.note_item();
                continue;
            }
            break;
        }

        item.next_nesting_level = self.nesting.level();
        Ok(item)
    }

    fn next_plain_item(&mut self) -> Result<Item<'buf>, CBORError> {
        let decoded = self.decode_aggregated()?;
        let mut item = Item::new(decoded.value, 0, 0);
        item.tag_bits = decoded.tag_bits;
        item.tags = decoded.tags;
        item.allocated = decoded.allocated;
        Ok(item)
    }

    fn next_map_entry(&mut self) -> Result<Item<'buf>, CBORError> {
        let label = self.decode_aggregated()?;
        let label = self.classify_label(label.value)?;
        let value = self.decode_aggregated()?;
        let mut item = Item::new(value.value, 0, 0);
        item.label = Some(label);
        item.tag_bits = value.tag_bits;
        item.tags = value.tags;
        item.allocated = value.allocated;
        Ok(item)
    }

    fn classify_label(&self, value: Value<'buf>) -> Result<Label<'buf>, CBORError> {
        if self.mode == DecodeMode::MapStringsOnly {
            return match value {
                Value::Tstr(s) => Ok(Label::Tstr(s)),
                _ => Err(CBORError::MapLabelType),
            };
        }
        match value {
            Value::UInt(v) => Ok(Label::UInt(v)),
            Value::NInt(v) => Ok(Label::NInt(v)),
            Value::Tstr(s) => Ok(Label::Tstr(s)),
            Value::Bstr(b) => Ok(Label::Bstr(b)),
            _ => Err(CBORError::MapLabelType),
        }
    }

    /// Read one item's worth of tags (§4.8) plus its underlying value, aggregating an
    /// indefinite-length string (§4.7) if that's what follows the tags, and apply tag-specific
    /// reclassification.
    fn decode_aggregated(&mut self) -> Result<Decoded<'buf>, CBORError> {
        let mut tags = TagList::new();
        let mut tag_bits = 0u64;
        loop {
            match self.decode_raw()? {
                Raw::Tag(t) => {
                    self.tag_table.mark(&mut tag_bits, t);
                    tags.push(t);
                }
                Raw::Break => return Err(CBORError::BadBreak),
                Raw::StringStart(major) => {
                    let value = self.aggregate_string(major)?;
                    let value = self.reclassify(value, &tags)?;
                    return Ok(Decoded { value, tag_bits, tags, allocated: true });
                }
                Raw::Value(value) => {
                    let value = self.reclassify(value, &tags)?;
                    return Ok(Decoded { value, tag_bits, tags, allocated: false });
                }
            }
        }
    }

    /// Apply the post-processing spec §4.8 describes for the innermost recognized tag, if any.
    fn reclassify(&mut self, value: Value<'buf>, tags: &TagList) -> Result<Value<'buf>, CBORError> {
        match tags.innermost() {
            Some(tags::DATE_STRING) => match value {
                Value::Tstr(s) => Ok(Value::DateString(s)),
                _ => Err(CBORError::BadOptTag),
            },
            Some(tags::DATE_EPOCH) => self.reclassify_date_epoch(value),
            Some(tags::POS_BIGNUM) => match value {
                Value::Bstr(b) => Ok(Value::PosBignum(b)),
                _ => Err(CBORError::BadOptTag),
            },
            Some(tags::NEG_BIGNUM) => match value {
                Value::Bstr(b) => Ok(Value::NegBignum(b)),
                _ => Err(CBORError::BadOptTag),
            },
            Some(tags::DECIMAL_FRACTION) => match value {
                Value::Array { count } => self.finish_decimal_like(count, false),
                _ => Err(CBORError::BadOptTag),
            },
            Some(tags::BIGFLOAT) => match value {
                Value::Array { count } => self.finish_decimal_like(count, true),
                _ => Err(CBORError::BadOptTag),
            },
            _ => Ok(value),
        }
    }

    fn reclassify_date_epoch(&mut self, value: Value<'buf>) -> Result<Value<'buf>, CBORError> {
        let (seconds, fraction) = match value {
            Value::UInt(v) => date_epoch_from_uint(v)?,
            Value::NInt(v) => date_epoch_from_nint(v)?,
            #[cfg(feature = "float")]
            Value::Float16(f) => date_epoch_from_f64(crate::halffloat::to_f64(f))?,
            #[cfg(feature = "float")]
            Value::Float32(f) => date_epoch_from_f64(f as f64)?,
            #[cfg(feature = "float")]
            Value::Float64(f) => date_epoch_from_f64(f)?,
            _ => return Err(CBORError::BadOptTag),
        };
        Ok(Value::DateEpoch { seconds, fraction })
    }

    /// Tag 4/5 reclassifies a 2-element array `[exponent, mantissa]` into a single decimal-fraction
    /// or bigfloat item; the two elements are consumed here directly rather than descended into as
    /// their own items, since they are this tagged item's payload, not independent siblings.
    fn finish_decimal_like(&mut self, count: Option<u64>, bigfloat: bool) -> Result<Value<'buf>, CBORError> {
        if count != Some(2) {
            return Err(CBORError::BadOptTag);
        }
        let exponent = match self.decode_aggregated()?.value {
            Value::UInt(v) if v <= i64::MAX as u64 => v as i64,
            Value::NInt(v) if v <= i64::MAX as u64 => -1 - v as i64,
            _ => return Err(CBORError::BadOptTag),
        };
        let mantissa = match self.decode_aggregated()?.value {
            Value::UInt(v) if v <= i64::MAX as u64 => Mantissa::I64(v as i64),
            Value::NInt(v) if v <= i64::MAX as u64 => Mantissa::I64(-1 - v as i64),
            Value::PosBignum(b) => Mantissa::Big { negative: false, bytes: b },
            Value::NegBignum(b) => Mantissa::Big { negative: true, bytes: b },
            _ => return Err(CBORError::BadOptTag),
        };
        Ok(if bigfloat {
            Value::Bigfloat { exponent, mantissa }
        } else {
            Value::DecimalFraction { exponent, mantissa }
        })
    }

    /// Parse one head and its immediate payload, without touching tags, nesting or string
    /// aggregation (spec §4.6).
    fn decode_raw(&mut self) -> Result<Raw<'buf>, CBORError> {
        let hd = head::decode_head(&mut self.inp)?;
        match hd.major {
            MT_UINT => Ok(Raw::Value(Value::UInt(hd.argument))),
            MT_NINT => {
                if hd.argument > i64::MAX as u64 {
                    return Err(CBORError::IntOverflow);
                }
                Ok(Raw::Value(Value::NInt(hd.argument)))
            }
            MT_BSTR => {
                if hd.is_indefinite() {
                    Ok(Raw::StringStart(MT_BSTR))
                } else {
                    let bytes = self.inp.get_bytes(hd.argument as usize)?;
                    Ok(Raw::Value(Value::Bstr(bytes)))
                }
            }
            MT_TSTR => {
                if hd.is_indefinite() {
                    Ok(Raw::StringStart(MT_TSTR))
                } else {
                    let bytes = self.inp.get_bytes(hd.argument as usize)?;
                    let s = core::str::from_utf8(bytes).map_err(|_| CBORError::InvalidCBOR)?;
                    Ok(Raw::Value(Value::Tstr(s)))
                }
            }
            MT_ARRAY => Ok(Raw::Value(Value::Array { count: Self::container_count(hd)? })),
            MT_MAP => Ok(Raw::Value(Value::Map { count: Self::container_count(hd)? })),
            MT_TAG => Ok(Raw::Tag(hd.argument)),
            MT_SIMPLE => self.decode_simple(hd),
            _ => Err(CBORError::InvalidCBOR),
        }
    }

    fn container_count(hd: HeadInfo) -> Result<Option<u64>, CBORError> {
        if hd.is_indefinite() {
            return Ok(None);
        }
        if hd.argument > MAX_ARRAY_ITEMS {
            return Err(CBORError::ArrayTooLong);
        }
        Ok(Some(hd.argument))
    }

    fn decode_simple(&mut self, hd: HeadInfo) -> Result<Raw<'buf>, CBORError> {
        match hd.ai {
            0..=19 => Ok(Raw::Value(Value::Simple(hd.argument as u8))),
            SIMPLE_FALSE => Ok(Raw::Value(Value::False)),
            SIMPLE_TRUE => Ok(Raw::Value(Value::True)),
            SIMPLE_NULL => Ok(Raw::Value(Value::Null)),
            SIMPLE_UNDEFINED => Ok(Raw::Value(Value::Undefined)),
            AI_ONE_BYTE => {
                if hd.argument < 32 {
                    Err(CBORError::BadTypeSeven)
                } else {
                    Ok(Raw::Value(Value::Simple(hd.argument as u8)))
                }
            }
            #[cfg(feature = "float")]
            FLOAT_HALF => {
                let bytes = (hd.argument as u16).to_be_bytes();
                Ok(Raw::Value(Value::Float16(crate::halffloat::from_be_bytes(bytes))))
            }
            #[cfg(not(feature = "float"))]
            FLOAT_HALF => Err(CBORError::Unsupported),
            #[cfg(feature = "float")]
            FLOAT_SINGLE => Ok(Raw::Value(Value::Float32(f32::from_bits(hd.argument as u32)))),
            #[cfg(not(feature = "float"))]
            FLOAT_SINGLE => Err(CBORError::Unsupported),
            #[cfg(feature = "float")]
            FLOAT_DOUBLE => Ok(Raw::Value(Value::Float64(f64::from_bits(hd.argument)))),
            #[cfg(not(feature = "float"))]
            FLOAT_DOUBLE => Err(CBORError::Unsupported),
            AI_INDEFINITE => Ok(Raw::Break),
            _ => Err(CBORError::Unsupported),
        }
    }

    /// Aggregate an indefinite-length string's chunks into one contiguous slice (spec §4.7). The
    /// chunk headers are scanned twice: once to total the length so the allocator is called
    /// exactly once, and once more (after rewinding) to copy the bytes.
    fn aggregate_string(&mut self, major: u8) -> Result<Value<'buf>, CBORError> {
        let start = self.inp.tell();
        let mut total_len: usize = 0;
        loop {
            let hd = head::decode_head(&mut self.inp)?;
            if hd.major == MT_SIMPLE && hd.is_indefinite() {
                break;
            }
            if hd.major != major || hd.is_indefinite() {
                return Err(CBORError::IndefiniteStringChunk);
            }
            let len = hd.argument as usize;
            self.inp.get_bytes(len)?;
            total_len = total_len.checked_add(len).ok_or(CBORError::StringTooLong)?;
        }

        let allocator = self.allocator.as_mut().ok_or(CBORError::NoStringAllocator)?;
        let dest = allocator.alloc(total_len)?;

        self.inp.seek(start);
        let mut offset = 0usize;
        loop {
            let hd = head::decode_head(&mut self.inp)?;
            if hd.major == MT_SIMPLE && hd.is_indefinite() {
                break;
            }
            let len = hd.argument as usize;
            let chunk = self.inp.get_bytes(len)?;
            dest[offset..offset + len].copy_from_slice(chunk);
            offset += len;
        }

        match major {
            MT_BSTR => Ok(Value::Bstr(dest)),
            _ => {
                let s = core::str::from_utf8(dest).map_err(|_| CBORError::InvalidCBOR)?;
                Ok(Value::Tstr(s))
            }
        }
    }
}

fn date_epoch_from_uint(v: u64) -> Result<(i64, f64), CBORError> {
    if v > i64::MAX as u64 {
        return Err(CBORError::DateOverflow);
    }
    Ok((v as i64, 0.0))
}

fn date_epoch_from_nint(v: u64) -> Result<(i64, f64), CBORError> {
    if v > i64::MAX as u64 {
        return Err(CBORError::DateOverflow);
    }
    Ok((-1 - v as i64, 0.0))
}

/// Safety margin (seconds) for double-precision rounding near the `i64` range boundary.
#[cfg(feature = "float")]
const DATE_OVERFLOW_MARGIN: f64 = 1.0;

#[cfg(feature = "float")]
fn date_epoch_from_f64(f: f64) -> Result<(i64, f64), CBORError> {
    if !f.is_finite()
        || f >= (i64::MAX as f64 - DATE_OVERFLOW_MARGIN)
        || f <= (i64::MIN as f64 + DATE_OVERFLOW_MARGIN)
    {
        return Err(CBORError::DateOverflow);
    }
    // `as i64` truncates toward zero, same as `f.trunc()`, without pulling in a std-only method.
    let seconds = f as i64;
    Ok((seconds, f - seconds as f64))
}

/// `true` if the built-in tag numbered `tag` is applied to `item`. A thin wrapper matching the
/// external interface sketch; `Item::has_tag` does the actual work.
pub fn is_tagged(item: &Item, tag: u64) -> bool {
    item.has_tag(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "alloc")]
    use crate::alloc::BumpAllocator;

    #[test]
    fn single_positive_int_is_one_top_level_item() {
        let mut dec = Decoder::new(&[0x01]).unwrap();
        let item = dec.get_next().unwrap();
        assert_eq!(item.value, Value::UInt(1));
        assert_eq!(item.nesting_level, 0);
        assert_eq!(item.next_nesting_level, 0);
        assert!(dec.get_next().is_err());
        dec.finish().unwrap();
    }

    #[test]
    fn array_of_int_and_bstr_decodes_in_preorder() {
        let bytes = [0x82, 0x19, 0x01, 0xC3, 0x43, 0x19, 0x01, 0xD2];
        let mut dec = Decoder::new(&bytes).unwrap();

        let array = dec.get_next().unwrap();
        assert_eq!(array.value, Value::Array { count: Some(2) });
        assert_eq!((array.nesting_level, array.next_nesting_level), (0, 1));

        let n = dec.get_next().unwrap();
        assert_eq!(n.value, Value::UInt(451));
        assert_eq!((n.nesting_level, n.next_nesting_level), (1, 1));

        let bstr = dec.get_next().unwrap();
        assert_eq!(bstr.value, Value::Bstr(&[0x19, 0x01, 0xD2]));
        assert_eq!((bstr.nesting_level, bstr.next_nesting_level), (1, 0));

        dec.finish().unwrap();
    }

    #[test]
    fn map_entry_carries_its_label() {
        let bytes = [0xA1, 0x18, 0x42, 0xF5];
        let mut dec = Decoder::new(&bytes).unwrap();

        let map = dec.get_next().unwrap();
        assert_eq!(map.value, Value::Map { count: Some(1) });

        let entry = dec.get_next().unwrap();
        assert_eq!(entry.value, Value::True);
        assert_eq!(entry.label, Some(Label::UInt(66)));

        dec.finish().unwrap();
    }

    #[test]
    fn tag_one_on_uint_becomes_date_epoch() {
        let bytes = [0xC1, 0x1A, 0x58, 0x0D, 0x41, 0x72];
        let mut dec = Decoder::new(&bytes).unwrap();
        let item = dec.get_next().unwrap();
        assert_eq!(item.value, Value::DateEpoch { seconds: 1_477_263_730, fraction: 0.0 });
        dec.finish().unwrap();
    }

    #[test]
    fn indefinite_array_reports_descending_next_level_then_ascends() {
        let bytes = [0x9F, 0x01, 0x02, 0xFF];
        let mut dec = Decoder::new(&bytes).unwrap();

        let array = dec.get_next().unwrap();
        assert_eq!(array.value, Value::Array { count: None });
        assert_eq!(array.next_nesting_level, 1);

        let first = dec.get_next().unwrap();
        assert_eq!(first.value, Value::UInt(1));
        assert_eq!(first.next_nesting_level, 1);

        let second = dec.get_next().unwrap();
        assert_eq!(second.value, Value::UInt(2));
        assert_eq!(second.next_nesting_level, 0);

        dec.finish().unwrap();
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn indefinite_text_string_aggregates_chunks_through_allocator() {
        let bytes = [0x7F, 0x62, b'a', b'b', 0x61, b'c', 0xFF];
        let mut arena = [0u8; 8];
        let mut allocator = BumpAllocator::new(&mut arena);
        let mut dec = Decoder::new(&bytes).unwrap();
        dec.set_string_allocator(&mut allocator);

        let item = dec.get_next().unwrap();
        match item.value {
            Value::Tstr(s) => assert_eq!(s, "abc"),
            other => panic!("expected Tstr, got {:?}", other),
        }
        dec.finish().unwrap();
    }

    #[test]
    fn indefinite_string_without_allocator_fails() {
        let bytes = [0x7F, 0x61, b'a', 0xFF];
        let mut dec = Decoder::new(&bytes).unwrap();
        assert!(matches!(dec.get_next(), Err(CBORError::NoStringAllocator)));
    }

    #[test]
    fn map_strings_only_mode_rejects_integer_label() {
        let bytes = [0xA1, 0x01, 0xF5];
        let mut dec = Decoder::with_mode(&bytes, DecodeMode::MapStringsOnly).unwrap();
        assert_eq!(dec.get_next().unwrap().value, Value::Map { count: Some(1) });
        assert!(matches!(dec.get_next(), Err(CBORError::MapLabelType)));
    }

    #[test]
    fn map_as_array_mode_doubles_the_count_and_flattens_entries() {
        let bytes = [0xA1, 0x01, 0xF5];
        let mut dec = Decoder::with_mode(&bytes, DecodeMode::MapAsArray).unwrap();
        let array = dec.get_next().unwrap();
        assert_eq!(array.value, Value::Array { count: Some(2) });
        let label = dec.get_next().unwrap();
        assert_eq!(label.value, Value::UInt(1));
        assert!(label.label.is_none());
        let value = dec.get_next().unwrap();
        assert_eq!(value.value, Value::True);
        dec.finish().unwrap();
    }

    #[test]
    fn extra_trailing_byte_fails_finish() {
        let bytes = [0x01, 0x02];
        let mut dec = Decoder::new(&bytes).unwrap();
        dec.get_next().unwrap();
        assert!(matches!(dec.finish(), Err(CBORError::ExtraBytes)));
    }

    #[test]
    fn negative_int_magnitude_overflowing_i64_is_rejected() {
        let bytes = [0x3B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut dec = Decoder::new(&bytes).unwrap();
        assert!(matches!(dec.get_next(), Err(CBORError::IntOverflow)));
    }
}
