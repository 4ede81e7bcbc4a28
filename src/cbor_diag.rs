/***************************************************************************************************
 * Copyright (c) 2021, 2022 Qualcomm Innovation Center, Inc. All rights reserved.
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
/// # diag - CBOR diagnostic style output for structured binary data
///
/// CBOR diagnostic notation is defined in RFC7049 and extended slightly in RFC8610. While it was
/// expressly designed for CBOR, it is sufficiently expressive that it is appropriate for many
/// TLV-style binary representations.
///
/// ## Format recap
///
/// - <tag> ( <data> ) is used to denote tags.
/// - uint, int, float types are formatted in their natural programming language formats.
/// - true, false and null mean what you would expect.
/// - Strings are written 'as a string' in double quotes.
/// - Byte strings are written as h'0123456789abcdef'.
///
/// Unlike the AST-based diagnostic printer this module replaces, there is no tree to recurse
/// over: the decoder hands back one `Item` at a time, so the printer tracks open container
/// brackets on a small stack and closes them as `next_nesting_level` reports each container's
/// last member.
#[cfg(any(feature = "full", test))]
use std::boxed::Box;

#[cfg(any(feature = "full", test))]
use std::error::Error;

#[cfg(any(feature = "full", test))]
use std::io::Write;

#[cfg(any(feature = "full", test))]
use std::string::String;

#[cfg(any(feature = "full", test))]
use std::vec::Vec;

#[cfg(any(feature = "full", test))]
use crate::decode::Decoder;
#[cfg(any(feature = "full", test))]
use crate::item::{Item, Label, Value};

/// Trait defining helper functions for conveniently displaying information in CBOR diagnostic
/// format.
#[cfg(any(feature = "full", test))]
pub trait Diag {
    /// Write every remaining top-level item as CBOR diagnostic notation.
    fn cbor_diag(&mut self, outfp: &mut dyn Write) -> Result<(), Box<dyn Error>>;
}

#[cfg(any(feature = "full", test))]
impl<'buf, 'alloc> Diag for Decoder<'buf, 'alloc> {
    fn cbor_diag(&mut self, outfp: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        print_items(self, outfp)
    }
}

#[cfg(any(feature = "full", test))]
fn print_items(
    dec: &mut Decoder,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    // One closing bracket character per currently open array/map, indexed by nesting depth.
    let mut closers: Vec<char> = Vec::new();

    loop {
        let item = match dec.get_next() {
            Ok(item) => item,
            Err(crate::error::CBORError::NoMoreItems) => break,
            Err(e) => return Err(Box::new(e)),
        };

        write!(out, "{}", indent(item.nesting_level as u32))?;
        if let Some(label) = &item.label {
            diag_label(out, label)?;
            write!(out, ": ")?;
        }

        match item.value {
            // The nesting tracker closes a zero-length container in the same `get_next` call
            // that opened it, so its bracket is closed below by the generic cascade, same as a
            // non-empty one — never close it here too.
            Value::Array { .. } => {
                write!(out, "[")?;
                closers.push(']');
                writeln!(out)?;
            }
            Value::Map { .. } => {
                write!(out, "{{")?;
                closers.push('}');
                writeln!(out)?;
            }
            ref value => {
                diag_value(out, value)?;
                writeln!(out, ",")?;
            }
        }

        let mut level = item.nesting_level;
        while item.next_nesting_level < level {
            level -= 1;
            let closer = closers.pop().unwrap_or(' ');
            writeln!(out, "{}{},", indent(level as u32), closer)?;
        }
    }
    Ok(())
}

#[cfg(any(feature = "full", test))]
fn diag_label(out: &mut dyn Write, label: &Label) -> Result<(), std::io::Error> {
    match label {
        Label::UInt(v) => write!(out, "{}", v),
        Label::NInt(v) => write!(out, "{}", -1i128 - (*v as i128)),
        Label::Tstr(s) => write!(out, "\"{}\"", s),
        Label::Bstr(b) => diag_bstr(out, b),
    }
}

#[cfg(any(feature = "full", test))]
fn diag_value(out: &mut dyn Write, value: &Value) -> Result<(), std::io::Error> {
    match value {
        Value::UInt(v) => write!(out, "{}", v),
        Value::NInt(v) => write!(out, "{}", -1i128 - (*v as i128)),
        Value::Bstr(b) => diag_bstr(out, b),
        Value::Tstr(s) => write!(out, "\"{}\"", s),
        Value::Simple(v) => write!(out, "simple({})", v),
        Value::False => write!(out, "false"),
        Value::True => write!(out, "true"),
        Value::Null => write!(out, "null"),
        Value::Undefined => write!(out, "undefined"),
        #[cfg(feature = "float")]
        Value::Float16(v) => write!(out, "{}", v),
        #[cfg(feature = "float")]
        Value::Float32(v) => write!(out, "{}", v),
        #[cfg(feature = "float")]
        Value::Float64(v) => write!(out, "{}", v),
        Value::DateString(s) => write!(out, "0(\"{}\")", s),
        Value::DateEpoch { seconds, fraction } if *fraction == 0.0 => {
            write!(out, "1({})", seconds)
        }
        Value::DateEpoch { seconds, fraction } => {
            write!(out, "1({})", *seconds as f64 + fraction)
        }
        Value::PosBignum(b) => {
            write!(out, "2(")?;
            diag_bstr(out, b)?;
            write!(out, ")")
        }
        Value::NegBignum(b) => {
            write!(out, "3(")?;
            diag_bstr(out, b)?;
            write!(out, ")")
        }
        Value::DecimalFraction { exponent, mantissa } => {
            write!(out, "4([{}, ", exponent)?;
            diag_mantissa(out, mantissa)?;
            write!(out, "])")
        }
        Value::Bigfloat { exponent, mantissa } => {
            write!(out, "5([{}, ", exponent)?;
            diag_mantissa(out, mantissa)?;
            write!(out, "])")
        }
        // Array/Map are printed by `print_items` itself, since their members are separate items.
        Value::Array { .. } | Value::Map { .. } => Ok(()),
    }
}

#[cfg(any(feature = "full", test))]
fn diag_mantissa(out: &mut dyn Write, mantissa: &crate::item::Mantissa) -> Result<(), std::io::Error> {
    match mantissa {
        crate::item::Mantissa::I64(v) => write!(out, "{}", v),
        crate::item::Mantissa::Big { negative, bytes } => {
            write!(out, "{}(", if *negative { 3 } else { 2 })?;
            diag_bstr(out, bytes)?;
            write!(out, ")")
        }
    }
}

#[cfg(any(feature = "full", test))]
fn diag_bstr(out: &mut dyn Write, v: &[u8]) -> Result<(), std::io::Error> {
    write!(out, "h'")?;
    for byte in v {
        write!(out, "{}", print_hex(*byte))?;
    }
    write!(out, "'")
}

/// Construct an indentation string to indent to indent level `idt`.
#[cfg(any(feature = "full", test))]
fn indent(idt: u32) -> String {
    let mut s: String = String::new();
    for _i in 0..(2 * idt) {
        s.push(' ');
    }
    s
}

/// Print a byte as two hex characters.
///
/// Unfortunately, the #x formatter always puts "0x" in front of a value and we do not want this in
/// diagnostic format, so we implement this manually
#[cfg(any(feature = "full", test))]
pub fn print_hex(b: u8) -> &'static str {
    let table = [
        "00", "01", "02", "03", "04", "05", "06", "07", "08", "09", "0a", "0b", "0c", "0d", "0e",
        "0f", "10", "11", "12", "13", "14", "15", "16", "17", "18", "19", "1a", "1b", "1c", "1d",
        "1e", "1f", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "2a", "2b", "2c",
        "2d", "2e", "2f", "30", "31", "32", "33", "34", "35", "36", "37", "38", "39", "3a", "3b",
        "3c", "3d", "3e", "3f", "40", "41", "42", "43", "44", "45", "46", "47", "48", "49", "4a",
        "4b", "4c", "4d", "4e", "4f", "50", "51", "52", "53", "54", "55", "56", "57", "58", "59",
        "5a", "5b", "5c", "5d", "5e", "5f", "60", "61", "62", "63", "64", "65", "66", "67", "68",
        "69", "6a", "6b", "6c", "6d", "6e", "6f", "70", "71", "72", "73", "74", "75", "76", "77",
        "78", "79", "7a", "7b", "7c", "7d", "7e", "7f", "80", "81", "82", "83", "84", "85", "86",
        "87", "88", "89", "8a", "8b", "8c", "8d", "8e", "8f", "90", "91", "92", "93", "94", "95",
        "96", "97", "98", "99", "9a", "9b", "9c", "9d", "9e", "9f", "a0", "a1", "a2", "a3", "a4",
        "a5", "a6", "a7", "a8", "a9", "aa", "ab", "ac", "ad", "ae", "af", "b0", "b1", "b2", "b3",
        "b4", "b5", "b6", "b7", "b8", "b9", "ba", "bb", "bc", "bd", "be", "bf", "c0", "c1", "c2",
        "c3", "c4", "c5", "c6", "c7", "c8", "c9", "ca", "cb", "cc", "cd", "ce", "cf", "d0", "d1",
        "d2", "d3", "d4", "d5", "d6", "d7", "d8", "d9", "da", "db", "dc", "dd", "de", "df", "e0",
        "e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8", "e9", "ea", "eb", "ec", "ed", "ee", "ef",
        "f0", "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "fa", "fb", "fc", "fd", "fe",
        "ff",
    ];
    table[b as usize]
}
