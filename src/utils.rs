/***************************************************************************************************
 * Copyright (c) 2021 Qualcomm Innovation Center, Inc. All rights reserved.
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
 * qcbor-core utilities
 **************************************************************************************************/
use crate::constants::allow;
#[cfg(feature = "trace")]
use func_trace::trace;

use crate::error::CBORError;
use crate::item::{Item, Value};

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Return `true` if it is possible to obtain a slice of length `len` starting from `start` from
/// `buf`
#[cfg_attr(feature = "trace", trace)]
#[inline]
pub fn within(buf: &[u8], start: usize, len: usize) -> bool {
    start + len <= buf.len()
}

/// A bitmask of data types the `spiffy` search layer's type-wildcard matching will accept.
#[cfg(feature = "combinators")]
#[derive(Debug, Copy, Clone)]
pub struct Allowable(u32);

#[cfg(feature = "combinators")]
impl Allowable {
    pub fn new(v: u32) -> Self {
        Allowable(v)
    }

    pub fn allow_none(&self) -> bool {
        self.0 & allow::NONE != 0
    }

    pub fn allow_uint(&self) -> bool {
        self.0 & allow::UINT != 0
    }

    pub fn allow_nint(&self) -> bool {
        self.0 & allow::NINT != 0
    }

    pub fn allow_bstr(&self) -> bool {
        self.0 & allow::BSTR != 0
    }

    pub fn allow_tstr(&self) -> bool {
        self.0 & allow::TSTR != 0
    }

    pub fn allow_array(&self) -> bool {
        self.0 & allow::ARRAY != 0
    }

    pub fn allow_map(&self) -> bool {
        self.0 & allow::MAP != 0
    }

    pub fn allow_tag(&self) -> bool {
        self.0 & allow::TAG != 0
    }

    pub fn allow_simple(&self) -> bool {
        self.0 & allow::SIMPLE != 0
    }

    pub fn allow_float(&self) -> bool {
        self.0 & allow::FLOAT != 0
    }

    /// `true` if `value`'s data type is one this mask permits.
    pub fn permits(&self, value: &Value) -> bool {
        match value {
            Value::UInt(_) => self.allow_uint(),
            Value::NInt(_) => self.allow_nint(),
            Value::Bstr(_) => self.allow_bstr(),
            Value::Tstr(_) => self.allow_tstr(),
            Value::Array { .. } => self.allow_array(),
            Value::Map { .. } => self.allow_map(),
            Value::Simple(_) | Value::False | Value::True | Value::Null | Value::Undefined => {
                self.allow_simple()
            }
            #[cfg(feature = "float")]
            Value::Float16(_) | Value::Float32(_) | Value::Float64(_) => self.allow_float(),
            // Tag-derived extension types (dates, bignums, decimal fractions, bigfloats) are
            // reached only through an applied tag, so they are gated by `allow_tag`.
            _ => self.allow_tag(),
        }
    }
}

#[cfg(feature = "combinators")]
pub trait Filter {
    type Error;

    fn allow(self, allow: Allowable) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

#[cfg(feature = "combinators")]
impl<'buf> Filter for Option<Item<'buf>> {
    type Error = CBORError;

    fn allow(self, allow: Allowable) -> Result<Option<Item<'buf>>, Self::Error> {
        match &self {
            Some(item) => {
                if allow.permits(&item.value) {
                    Ok(self)
                } else {
                    Err(CBORError::UnexpectedType)
                }
            }
            None => {
                if allow.allow_none() {
                    Ok(self)
                } else {
                    Err(CBORError::NotFound)
                }
            }
        }
    }
}
