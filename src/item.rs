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
 * Decoded item data model
 *
 * One fully decorated `Item` is produced per call to the decoder's traversal function. Unlike the
 * AST-returning decoders elsewhere in this lineage, an `Item` never owns or wraps a sub-slice of
 * the input representing a whole container: arrays and maps are represented by a single `Item`
 * naming their declared length (or `None` for indefinite-length), and their members are the
 * `Item`s the traversal yields next, distinguished from siblings by `nesting_level`.
 **************************************************************************************************/
use crate::constants::tags;

/// Upper bound on the number of tags a single item may carry. Matches the nesting tracker's
/// embedded-friendly philosophy of bounded, stack-free storage.
pub const MAX_TAGS_PER_ITEM: usize = 4;

/// The big-number-backed mantissa of a decimal fraction or bigfloat (tag 4/5, RFC 8949 §3.4.4).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Mantissa<'buf> {
    /// Mantissa fits in a 64 bit signed integer.
    I64(i64),
    /// Mantissa is carried as a big-endian magnitude with an explicit sign (tag 2/3 payload).
    Big { negative: bool, bytes: &'buf [u8] },
}

/// The fully typed payload of a decoded item. Each variant carries exactly the fields that data
/// type needs; there is no untyped "one big union" the way a C implementation would model this.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value<'buf> {
    /// Major type 0.
    UInt(u64),
    /// Major type 1. The on-the-wire encoded magnitude; true value is `-1 - NInt(n)`.
    NInt(u64),
    /// Major type 2. For an indefinite-length byte string this is the chunk-aggregated result,
    /// which requires a string allocator (see [`crate::alloc`]).
    Bstr(&'buf [u8]),
    /// Major type 3, aggregated the same way as `Bstr` for the indefinite-length case.
    Tstr(&'buf str),
    /// Major type 4. `count` is `None` for an indefinite-length array.
    Array { count: Option<u64> },
    /// Major type 5. `count` is the number of key/value pairs; `None` for indefinite-length.
    Map { count: Option<u64> },
    /// Major type 7, additional info in 0..=19 or 32..=255: an application-specific simple value.
    Simple(u8),
    /// Major type 7, additional info 20.
    False,
    /// Major type 7, additional info 21.
    True,
    /// Major type 7, additional info 22.
    Null,
    /// Major type 7, additional info 23.
    Undefined,
    /// Major type 7, additional info 25: IEEE 754 half precision (tag-free).
    #[cfg(feature = "float")]
    Float16(half::f16),
    /// Major type 7, additional info 26: IEEE 754 single precision.
    #[cfg(feature = "float")]
    Float32(f32),
    /// Major type 7, additional info 27: IEEE 754 double precision.
    #[cfg(feature = "float")]
    Float64(f64),
    /// Tag 0: RFC 3339 date/time text string.
    DateString(&'buf str),
    /// Tag 1: seconds (and optional sub-second fraction) since the Unix epoch.
    DateEpoch { seconds: i64, fraction: f64 },
    /// Tag 2: unsigned big number.
    PosBignum(&'buf [u8]),
    /// Tag 3: negative big number (true value is `-1 - n` for big-endian magnitude `n`).
    NegBignum(&'buf [u8]),
    /// Tag 4: decimal fraction, `mantissa * 10^exponent`.
    DecimalFraction { exponent: i64, mantissa: Mantissa<'buf> },
    /// Tag 5: bigfloat, `mantissa * 2^exponent`.
    Bigfloat { exponent: i64, mantissa: Mantissa<'buf> },
}

/// The type of a map-entry label (key), constrained to the types the decode mode permits
/// (spec §4.9, error `MapLabelType`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Label<'buf> {
    UInt(u64),
    NInt(u64),
    Tstr(&'buf str),
    Bstr(&'buf [u8]),
}

/// Bounded, allocation-free collection of the tag numbers applied to a single item, in wire order
/// (outermost first). Built-in tags (see [`crate::tagtable`]) are additionally folded into
/// `Item::tag_bits` so common tags can be tested with a single mask instead of a scan.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TagList {
    values: [u64; MAX_TAGS_PER_ITEM],
    count: u8,
}

impl TagList {
    pub(crate) fn new() -> Self {
        TagList { values: [0; MAX_TAGS_PER_ITEM], count: 0 }
    }

    pub(crate) fn push(&mut self, tag: u64) -> bool {
        if (self.count as usize) < MAX_TAGS_PER_ITEM {
            self.values[self.count as usize] = tag;
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// All tag numbers applied to the item, outermost first.
    pub fn as_slice(&self) -> &[u64] {
        &self.values[..self.count as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The innermost (closest to the value) tag number, if any.
    pub fn innermost(&self) -> Option<u64> {
        if self.count == 0 {
            None
        } else {
            Some(self.values[self.count as usize - 1])
        }
    }
}

/// A single fully decorated item yielded by the decoder's pre-order traversal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Item<'buf> {
    /// The decoded value, including its data type.
    pub value: Value<'buf>,
    /// The map-entry label (key), if this item was read while inside a map via the base decoder
    /// rather than through a key/value pair returned by `spiffy`.
    pub label: Option<Label<'buf>>,
    /// Nesting level (number of enclosing arrays/maps) this item is found at.
    pub nesting_level: u8,
    /// Nesting level the *next* item from the traversal will be found at. When less than
    /// `nesting_level`, this item was the last member of one or more enclosing containers.
    pub next_nesting_level: u8,
    /// Bitmap with one bit set per recognized built-in tag (see [`crate::tagtable`]) applied to
    /// this item, innermost-last order preserved only in `tags`.
    pub tag_bits: u64,
    /// Every tag number applied to this item, in wire (outermost-first) order.
    pub tags: TagList,
    /// `true` if `value`'s `Bstr`/`Tstr` payload was produced by aggregating an indefinite-length
    /// string through a [`crate::alloc::StringAllocator`], and therefore must be released via
    /// that same allocator rather than treated as a view into the input buffer.
    pub allocated: bool,
}

impl<'buf> Item<'buf> {
    pub(crate) fn new(value: Value<'buf>, nesting_level: u8, next_nesting_level: u8) -> Self {
        Item {
            value,
            label: None,
            nesting_level,
            next_nesting_level,
            tag_bits: 0,
            tags: TagList::new(),
            allocated: false,
        }
    }

    /// `true` if the built-in tag numbered `tag` (see [`crate::constants::tags`]) is applied to
    /// this item.
    pub fn has_tag(&self, tag: u64) -> bool {
        match tags::BUILT_IN.iter().position(|&t| t == tag) {
            Some(bit) => self.tag_bits & (1u64 << bit) != 0,
            None => self.tags.as_slice().contains(&tag),
        }
    }
}
