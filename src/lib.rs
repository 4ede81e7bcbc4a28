/***************************************************************************************************
 * Copyright (c) 2020-2022, Qualcomm Innovation Center, Inc. All rights reserved.
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
 * qcbor-core module definition
 *
 * A streaming, allocation-free CBOR (RFC 8949) encoder and decoder aimed at constrained targets.
 * Encoding and decoding both operate over a single caller-owned buffer and neither the Rust
 * standard library nor an allocator is required in the default configuration.
 **************************************************************************************************/

// Default configuration
#![no_std]
#![warn(missing_docs)]

//! # qcbor-core
//!
//! `qcbor-core` provides a CBOR implementation aimed at embedded targets where the programmer
//! wants to maintain low-level control over serialization and deserialization. The typical
//! use-case is implementation of a standardized CBOR-based container or protocol such as COSE
//! [RFC 9052](https://datatracker.ietf.org/doc/rfc9052/),
//! [C509 certificates](https://datatracker.ietf.org/doc/draft-ietf-cose-cbor-encoded-cert/) or
//! [Entity Attestation Token](https://www.ietf.org/archive/id/draft-ietf-rats-eat-18.txt).
//!
//! The default configuration does not require an allocator and simply serializes or deserializes
//! on a byte buffer of the caller's choice. Indefinite-length string aggregation needs an
//! allocator (a caller-supplied [`alloc_api::StringAllocator`], or the built-in bump allocator
//! under the `alloc` feature), but nothing else in the crate does.
//!
//! ## Features
//!
//! - The [`encoder::Encoder`] is a streaming, append-only API: every `add_*`/`open_*`/`close_*`
//!   call returns `&mut Self` so calls chain, and array/map lengths are back-patched
//!   automatically as items are added, using the smallest available head encoding.
//! - The [`decoder::Decoder`] is a streaming pre-order traversal: [`decoder::Decoder::get_next`]
//!   returns one fully decorated [`types::Item`] at a time, annotated with its nesting level, so
//!   arrays and maps never need to be materialized as a tree.
//! - All CBOR major types are supported, along with RFC 8949 §3.4's tag-based extensions (dates,
//!   big numbers, decimal fractions, bigfloats) and (optionally) `f16`/`f32`/`f64` floats.
//! - The `combinators` feature (on by default) layers [`decoder::MapMark`]-based map entry/search
//!   on top of the base traversal, for looking up map entries by integer or text label without
//!   hand-rolling the scan.
//!
//! ## Examples
//!
//! In the examples below we encode, then decode, a simplified Entity Attestation Token claims
//! set, expressed in CBOR diagnostic notation as:
//!
//! > {
//! >      / eat_nonce /       10: h'948f8860d13a463e',
//! >      / oemid /          258: 64242, / Private Enterprise Number /
//! >      / oemboot /        262: true,
//! >      / hwversion /      260: [ "3.1", 1 ] / Type is multipart numeric /
//! >  }
//!
//! ### Encoding
//!
//! ```
//! use qcbor_core::encoder::Encoder;
//! use qcbor_core::error::CBORError;
//!
//! fn main() -> Result<(), CBORError> {
//!     let mut bytes = [0u8; 64];
//!     let mut enc = Encoder::new(&mut bytes)?;
//!     enc.open_map()
//!         .add_u64(10)
//!         .add_bytes(&[0x94, 0x8f, 0x88, 0x60, 0xd1, 0x3a, 0x46, 0x3e])
//!         .add_u64(258)
//!         .add_u64(64242)
//!         .add_u64(262)
//!         .add_bool(true)
//!         .add_u64(260)
//!         .open_array()
//!         .add_text("3.1")
//!         .add_u64(1)
//!         .close_array()
//!         .close_map();
//!     let encoded = enc.finish()?;
//!     assert_eq!(encoded.len(), 30);
//!     Ok(())
//! }
//! ```
//!
//! ### Decoding
//!
//! [`decoder::Decoder::get_next`] hands back one item per call in pre-order: the map itself
//! first, then each entry's value (with [`types::Item::label`] set to its key), descending into
//! the nested array the same way.
//!
//! ```
//! use qcbor_core::decoder::Decoder;
//! use qcbor_core::error::CBORError;
//! use qcbor_core::types::{Label, Value};
//!
//! fn main() -> Result<(), CBORError> {
//!     let mut bytes = [0u8; 64];
//!     let mut enc = qcbor_core::encoder::Encoder::new(&mut bytes)?;
//!     enc.open_map()
//!         .add_u64(10)
//!         .add_bytes(&[0x94, 0x8f, 0x88, 0x60, 0xd1, 0x3a, 0x46, 0x3e])
//!         .add_u64(260)
//!         .open_array()
//!         .add_text("3.1")
//!         .add_u64(1)
//!         .close_array()
//!         .close_map();
//!     let encoded = enc.finish()?;
//!
//!     let mut dec = Decoder::new(encoded)?;
//!
//!     let claims = dec.get_next()?;
//!     assert!(matches!(claims.value, Value::Map { count: Some(2) }));
//!
//!     let nonce = dec.get_next()?;
//!     assert_eq!(nonce.label, Some(Label::UInt(10)));
//!     assert_eq!(nonce.value, Value::Bstr(&[0x94, 0x8f, 0x88, 0x60, 0xd1, 0x3a, 0x46, 0x3e]));
//!
//!     let hw_version = dec.get_next()?;
//!     assert_eq!(hw_version.label, Some(Label::UInt(260)));
//!     assert!(matches!(hw_version.value, Value::Array { count: Some(2) }));
//!
//!     let version_string = dec.get_next()?;
//!     assert_eq!(version_string.value, Value::Tstr("3.1"));
//!
//!     let variant = dec.get_next()?;
//!     assert_eq!(variant.value, Value::UInt(1));
//!
//!     dec.finish()?;
//!     Ok(())
//! }
//! ```

// Pull in std if we are testing or if it is defined as feature (because we run tests on a
// platform supporting I/O and full feature set.
#[cfg(any(feature = "full", test))]
extern crate std;

// If we are really building no_std, pull in core as well. It is aliased as std so that "use"
// statements are always the same
#[cfg(all(not(feature = "std"), not(test)))]
extern crate core as std;

#[cfg(any(feature = "float", test))]
extern crate half;

#[cfg(any(feature = "full", test))]
extern crate chrono;

pub(crate) mod alloc;
#[cfg(any(feature = "full", test))]
mod cbor_diag;
pub(crate) mod constants;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod halffloat;
pub(crate) mod head;
pub(crate) mod inbuf;
pub(crate) mod item;
pub(crate) mod nesting;
pub(crate) mod outbuf;
#[cfg(feature = "combinators")]
pub(crate) mod spiffy;
pub(crate) mod tagtable;
pub(crate) mod utils;

/// The `error` module contains the single [`error::CBORError`] type returned throughout this
/// crate, plus its `Result` alias.
pub mod error;

/// Decoded item data model: [`types::Item`], its [`types::Value`] payload and
/// [`types::Label`] map-entry keys.
pub mod types {
    pub use super::item::{Item, Label, Mantissa, TagList, Value, MAX_TAGS_PER_ITEM};
}

/// The `decoder` module exports [`decoder::Decoder`], the streaming pre-order traversal, and
/// (under the `combinators` feature) the `spiffy` map-search/enter-map auxiliary layer.
pub mod decoder {
    pub use super::decode::{is_tagged, DecodeMode, Decoder};

    #[cfg(feature = "combinators")]
    pub use super::spiffy::{MapMark, MapQuery};

    #[cfg(feature = "combinators")]
    pub use super::utils::{Allowable, Filter};

    #[cfg(feature = "combinators")]
    pub use super::constants::allow::*;
}

/// The `encoder` module exports [`encoder::Encoder`], a streaming, allocation-free CBOR encoder.
pub mod encoder {
    pub use super::encode::Encoder;
}

/// The `alloc` module exports the [`alloc::StringAllocator`] trait used to aggregate
/// indefinite-length strings, and (under the `alloc` feature) the built-in
/// [`alloc::BumpAllocator`].
pub mod alloc_api {
    #[cfg(feature = "alloc")]
    pub use super::alloc::BumpAllocator;
    pub use super::alloc::StringAllocator;
}

#[cfg(any(feature = "full", test))]
pub mod debug {
    #[cfg(any(feature = "full", test))]
    pub use super::cbor_diag::print_hex;
    #[cfg(any(feature = "full", test))]
    pub use super::cbor_diag::Diag;
}
