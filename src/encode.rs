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
 * Streaming encoder
 *
 * Every `add_*`/`open_*`/`close_*` call first checks the sticky error on `OutBuf` and no-ops if
 * it is already set, so a caller can issue the whole call sequence unconditionally and check the
 * result once at `finish`. Array/map/bstr-wrap heads are reserved at one byte and back-patched by
 * `EncodeNesting::close` once their final count/length is known (spec §4.4's back-patch-by-memmove
 * protocol, generalized in `nesting.rs` to also cover the byte-string-wrap case).
 **************************************************************************************************/
use crate::constants::*;
use crate::error::CBORError;
use crate::head;
use crate::nesting::{EncodeNesting, FrameKind};
use crate::outbuf::OutBuf;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// A streaming, allocation-free CBOR encoder over a caller-owned buffer (or, via
/// [`Encoder::new_size_only`], no buffer at all).
pub struct Encoder<'buf> {
    out: OutBuf<'buf>,
    nesting: EncodeNesting,
}

impl<'buf> Encoder<'buf> {
    /// Build an encoder writing into `buf`, with the default maximum nesting depth.
    pub fn new(buf: &'buf mut [u8]) -> Result<Self, CBORError> {
        Self::with_max_depth(buf, DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Build an encoder writing into `buf`, bounding container nesting at `max_depth`.
    pub fn with_max_depth(buf: &'buf mut [u8], max_depth: u8) -> Result<Self, CBORError> {
        Ok(Encoder { out: OutBuf::new(buf)?, nesting: EncodeNesting::new(max_depth) })
    }

    /// Build an encoder with no backing buffer at all: every operation succeeds without writing
    /// anything, and `finish_get_size` reports the length the same call sequence would produce
    /// against a real buffer.
    pub fn new_size_only() -> Self {
        Encoder { out: OutBuf::new_size_only(), nesting: EncodeNesting::new(DEFAULT_MAX_NESTING_DEPTH) }
    }

    #[inline]
    fn note_item(&mut self) {
        let _ = self.nesting.note_item();
    }

    /// Add an unsigned integer (major type 0).
    #[cfg_attr(feature = "trace", trace)]
    pub fn add_u64(&mut self, value: u64) -> &mut Self {
        head::encode_head(&mut self.out, MT_UINT, value);
        self.note_item();
        self
    }

    /// Add a signed integer: major 0 if non-negative, major 1 (`-1 - n`) otherwise.
    #[cfg_attr(feature = "trace", trace)]
    pub fn add_i64(&mut self, value: i64) -> &mut Self {
        if value >= 0 {
            head::encode_head(&mut self.out, MT_UINT, value as u64);
        } else {
            // value = -1 - arg  =>  arg = -1 - value, computed in i128 to avoid overflow at MIN.
            let arg = (-1i128 - value as i128) as u64;
            head::encode_head(&mut self.out, MT_NINT, arg);
        }
        self.note_item();
        self
    }

    /// Add a byte string (major type 2).
    #[cfg_attr(feature = "trace", trace)]
    pub fn add_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        head::encode_head(&mut self.out, MT_BSTR, bytes.len() as u64);
        self.out.poke_slice(0, bytes);
        self.out.advance(bytes.len());
        self.note_item();
        self
    }

    /// Add a text string (major type 3).
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        head::encode_head(&mut self.out, MT_TSTR, text.len() as u64);
        self.out.poke_slice(0, text.as_bytes());
        self.out.advance(text.len());
        self.note_item();
        self
    }

    /// Add a simple value (major 7). Values 24..=31 are reserved and rejected; 20..=23 encode as
    /// the named simples `false`/`true`/`null`/`undefined` on the wire.
    #[cfg_attr(feature = "trace", trace)]
    pub fn add_simple(&mut self, value: u8) -> &mut Self {
        match value {
            0..=23 | 32..=255 => {
                head::encode_head(&mut self.out, MT_SIMPLE, value as u64);
                self.note_item();
            }
            _ => self.out.fail(CBORError::InvalidSimple),
        }
        self
    }

    /// Add the simple value `true`/`false`.
    pub fn add_bool(&mut self, value: bool) -> &mut Self {
        let simple = if value { SIMPLE_TRUE } else { SIMPLE_FALSE };
        head::encode_head(&mut self.out, MT_SIMPLE, simple as u64);
        self.note_item();
        self
    }

    /// Add the simple value `null`.
    pub fn add_null(&mut self) -> &mut Self {
        head::encode_head(&mut self.out, MT_SIMPLE, SIMPLE_NULL as u64);
        self.note_item();
        self
    }

    /// Add the simple value `undefined`.
    pub fn add_undefined(&mut self) -> &mut Self {
        head::encode_head(&mut self.out, MT_SIMPLE, SIMPLE_UNDEFINED as u64);
        self.note_item();
        self
    }

    /// Add an IEEE 754 half-precision float (major 7, additional info 25).
    #[cfg(feature = "float")]
    pub fn add_f16(&mut self, value: half::f16) -> &mut Self {
        self.out.poke(0, (MT_SIMPLE << MT_SHIFT) | FLOAT_HALF);
        self.out.poke_slice(1, &crate::halffloat::to_be_bytes(value));
        self.out.advance(3);
        self.note_item();
        self
    }

    /// Add an IEEE 754 single-precision float (major 7, additional info 26).
    #[cfg(feature = "float")]
    pub fn add_float(&mut self, value: f32) -> &mut Self {
        self.out.poke(0, (MT_SIMPLE << MT_SHIFT) | FLOAT_SINGLE);
        self.out.poke_slice(1, &value.to_be_bytes());
        self.out.advance(5);
        self.note_item();
        self
    }

    /// Add an IEEE 754 double-precision float (major 7, additional info 27).
    #[cfg(feature = "float")]
    pub fn add_double(&mut self, value: f64) -> &mut Self {
        self.out.poke(0, (MT_SIMPLE << MT_SHIFT) | FLOAT_DOUBLE);
        self.out.poke_slice(1, &value.to_be_bytes());
        self.out.advance(9);
        self.note_item();
        self
    }

    /// Add a tag (major 6). The next item added (atomic or container) is the tagged item; tagging
    /// does not itself count as an item in the enclosing container.
    pub fn add_tag(&mut self, tag: u64) -> &mut Self {
        head::encode_head(&mut self.out, MT_TAG, tag);
        self
    }

    /// Tag 1 followed by the epoch seconds as a signed integer.
    pub fn add_date_epoch(&mut self, seconds: i64) -> &mut Self {
        self.add_tag(tags::DATE_EPOCH);
        self.add_i64(seconds)
    }

    /// Tag 0 followed by an RFC 3339 date/time text string.
    pub fn add_date_string(&mut self, text: &str) -> &mut Self {
        self.add_tag(tags::DATE_STRING);
        self.add_text(text)
    }

    /// Copy already-encoded, well-formed CBOR bytes verbatim; counts as one item.
    pub fn add_encoded(&mut self, encoded: &[u8]) -> &mut Self {
        self.out.poke_slice(0, encoded);
        self.out.advance(encoded.len());
        self.note_item();
        self
    }

    /// Open an array: reserve a one-byte head slot and push a nesting frame.
    pub fn open_array(&mut self) -> &mut Self {
        self.open(FrameKind::Array)
    }

    /// Close the innermost open array, back-patching its minimal-width head.
    pub fn close_array(&mut self) -> &mut Self {
        self.close(FrameKind::Array)
    }

    /// Open a map: reserve a one-byte head slot and push a nesting frame. Pairs are added as two
    /// successive items (label, then value); the encoder does not validate label uniqueness.
    pub fn open_map(&mut self) -> &mut Self {
        self.open(FrameKind::Map)
    }

    /// Close the innermost open map. Fails (sticky) if an odd number of items were added.
    pub fn close_map(&mut self) -> &mut Self {
        self.close(FrameKind::Map)
    }

    /// Open an indefinite-length array: a single AI-31 head, terminated by `close_array_indefinite`.
    pub fn open_array_indefinite(&mut self) -> &mut Self {
        self.open_indefinite(FrameKind::Array)
    }

    /// Write the `break` terminating an indefinite-length array.
    pub fn close_array_indefinite(&mut self) -> &mut Self {
        self.close_indefinite(FrameKind::Array)
    }

    /// Open an indefinite-length map: a single AI-31 head, terminated by `close_map_indefinite`.
    pub fn open_map_indefinite(&mut self) -> &mut Self {
        self.open_indefinite(FrameKind::Map)
    }

    /// Write the `break` terminating an indefinite-length map.
    pub fn close_map_indefinite(&mut self) -> &mut Self {
        self.close_indefinite(FrameKind::Map)
    }

    /// Open a byte-string wrap (used by COSE-style protocols to stabilize hash/signature input):
    /// the items added before the matching `bstr_wrap_close` are themselves CBOR, and on close the
    /// whole span is re-tagged as a single byte string (major 2) holding those encoded bytes.
    pub fn bstr_wrap_open(&mut self) -> &mut Self {
        self.open(FrameKind::Bstr)
    }

    /// Close a byte-string wrap and return the slice of bytes it wraps (the wrapped CBOR content,
    /// not including the byte-string head itself).
    pub fn bstr_wrap_close(&mut self) -> Result<&[u8], CBORError> {
        if let Some(e) = self.out.error() {
            return Err(e);
        }
        let content_len = self.nesting.close(&mut self.out, FrameKind::Bstr)?;
        self.note_item();
        let end = self.out.tell();
        let start = end - content_len as usize;
        self.out.slice(start, end)
    }

    #[inline]
    fn open(&mut self, kind: FrameKind) -> &mut Self {
        if let Err(e) = self.nesting.open(&mut self.out, kind) {
            self.out.fail(e);
        }
        self
    }

    #[inline]
    fn close(&mut self, kind: FrameKind) -> &mut Self {
        match self.nesting.close(&mut self.out, kind) {
            Ok(_count) => self.note_item(),
            Err(e) => self.out.fail(e),
        }
        self
    }

    #[inline]
    fn open_indefinite(&mut self, kind: FrameKind) -> &mut Self {
        if let Err(e) = self.nesting.open_indefinite(&mut self.out, kind) {
            self.out.fail(e);
        }
        self
    }

    #[inline]
    fn close_indefinite(&mut self, kind: FrameKind) -> &mut Self {
        match self.nesting.close_indefinite(&mut self.out, kind) {
            Ok(()) => self.note_item(),
            Err(e) => self.out.fail(e),
        }
        self
    }

    /// Finish encoding: if the sticky error is set, return it; else if any container is still
    /// open return `ArrayOrMapStillOpen`; else return the encoded bytes.
    pub fn finish(self) -> Result<&'buf [u8], CBORError> {
        if let Some(e) = self.out.error() {
            return Err(e);
        }
        if !self.nesting.is_empty() {
            return Err(CBORError::ArrayOrMapStillOpen);
        }
        self.out.finish()
    }

    /// Finish a size-calculation-mode (or real) encode: fails the same way as `finish`, but
    /// returns only the length the encoded bytes would occupy.
    pub fn finish_get_size(self) -> Result<usize, CBORError> {
        if let Some(e) = self.out.error() {
            return Err(e);
        }
        if !self.nesting.is_empty() {
            return Err(CBORError::ArrayOrMapStillOpen);
        }
        self.out.finish_get_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn encodes_seed_scenario_two_array_of_int_and_bstr() {
        let mut buf = [0u8; 32];
        let mut enc = Encoder::new(&mut buf).unwrap();
        enc.open_array();
        enc.add_i64(451);
        enc.bstr_wrap_open();
        enc.add_u64(466);
        let wrapped: Vec<u8> = enc.bstr_wrap_close().unwrap().to_vec();
        enc.close_array();
        let encoded = enc.finish().unwrap();
        assert_eq!(encoded, &[0x82, 0x19, 0x01, 0xC3, 0x43, 0x19, 0x01, 0xD2]);
        assert_eq!(wrapped, &[0x19, 0x01, 0xD2]);
    }

    #[test]
    fn minimal_width_integer_encoding() {
        let mut buf = [0u8; 16];
        let mut enc = Encoder::new(&mut buf).unwrap();
        enc.add_u64(23);
        assert_eq!(enc.finish().unwrap(), &[0x17]);

        let mut buf = [0u8; 16];
        let mut enc = Encoder::new(&mut buf).unwrap();
        enc.add_u64(24);
        assert_eq!(enc.finish().unwrap(), &[0x18, 0x18]);
    }

    #[test]
    fn odd_map_items_fail_on_close() {
        let mut buf = [0u8; 16];
        let mut enc = Encoder::new(&mut buf).unwrap();
        enc.open_map();
        enc.add_u64(1);
        enc.close_map();
        assert!(matches!(enc.finish(), Err(CBORError::ArrayOrMapStillOpen)));
    }

    #[test]
    fn close_mismatch_is_sticky() {
        let mut buf = [0u8; 16];
        let mut enc = Encoder::new(&mut buf).unwrap();
        enc.open_array();
        enc.close_map();
        assert!(matches!(enc.finish(), Err(CBORError::CloseMismatch)));
    }

    #[test]
    fn size_only_mode_reports_length_without_writing() {
        let mut enc = Encoder::new_size_only();
        enc.open_array();
        enc.add_u64(451);
        enc.close_array();
        assert_eq!(enc.finish_get_size().unwrap(), 3);
    }

    #[test]
    fn indefinite_array_round_trips_through_break() {
        let mut buf = [0u8; 16];
        let mut enc = Encoder::new(&mut buf).unwrap();
        enc.open_array_indefinite();
        enc.add_u64(1);
        enc.add_u64(2);
        enc.close_array_indefinite();
        assert_eq!(enc.finish().unwrap(), &[0x9F, 0x01, 0x02, 0xFF]);
    }
}
