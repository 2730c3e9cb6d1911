/*
 * Copyright (C) 2021 taylor.fish <contact@taylor.fish>
 *
 * This file is part of base85.
 *
 * base85 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * base85 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with base85. If not, see <https://www.gnu.org/licenses/>.
 */

//! A compact base-85 encoding for embedding binary data in source files.
//!
//! The character set omits control characters, space, DEL, both quote
//! characters, the backslash, and `.,!?#/`, which leaves these 85
//! characters (in digit order):
//!
//! ```text
//! 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz$%&()*+-:;<=>@[]^_`{|}~
//! ```
//!
//! Input is split into blocks of four bytes. Each block is read as a
//! little-endian `u32` and written as five base-85 digits, least
//! significant digit first. A final block of one, two or three bytes is
//! written as two, three or four digits respectively.
//!
//! Decoding skips every character outside the set, so line breaks and
//! quotes added by [`format`] can be left in place.
//!
//! ```
//! let encoded = base85::encode_to_string(b"hello");
//! assert_eq!(encoded, "{v0<YQ1");
//! assert_eq!(base85::decode_to_vec("\"{v0<Y\"\n\"Q1\"\n"), b"hello");
//! ```

mod digit;

pub mod alphabet;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod len;
pub mod stream;

use digit::Digit;

const BASE: u32 = 85;
const BYTES_PER_BLOCK: usize = 4;
const DIGITS_PER_BLOCK: usize = 5;

pub use alphabet::{is_alphabet_char, is_alphabet_member, ALPHABET};

pub use decode::decode_bytes;
pub use decode::decode_into;
pub use decode::decode_to_vec;
pub use decode::Decoder;

pub use encode::encode_bytes;
pub use encode::encode_into;
pub use encode::encode_to_string;
pub use encode::encode_to_vec;
pub use encode::Encoder;

pub use error::{Error, Result};
pub use len::{decoded_len, decoded_len_filtered, encoded_len, Length};
