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

//! Functions and types for decoding base-85 data.
//!
//! Characters outside the alphabet are skipped wherever they appear, so
//! wrapped or quoted output can be decoded as-is.

use super::alphabet::digit;
use super::error::{Error, Result};
use super::len::{decoded_len_filtered, decoded_len_usize};
use super::Digit;
use super::{BYTES_PER_BLOCK, DIGITS_PER_BLOCK};

use core::iter::{Fuse, FusedIterator};

const POW85: [u64; DIGITS_PER_BLOCK] = [1, 85, 85 * 85, 85 * 85 * 85, 85 * 85 * 85 * 85];

/// Incremental decoder.
///
/// Holds the value and digit count of the current, incomplete group between
/// calls, so input may be split anywhere (even inside a group) without
/// changing the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoder {
    word: u64,
    digits: usize,
}

impl Decoder {
    pub const fn new() -> Self {
        Self {
            word: 0,
            digits: 0,
        }
    }

    /// Number of digits accumulated in the current group (0 to 4).
    pub fn pending_digits(&self) -> usize {
        self.digits
    }

    fn push(&mut self, d: Digit) -> Option<[u8; BYTES_PER_BLOCK]> {
        self.word += POW85[self.digits] * u64::from(d);
        self.digits += 1;
        if self.digits < DIGITS_PER_BLOCK {
            return None;
        }
        // A group can exceed `u32::MAX` only if it wasn't produced by the
        // encoder; keep the low 32 bits.
        let bytes = (self.word as u32).to_le_bytes();
        *self = Self::new();
        Some(bytes)
    }

    fn feed<F>(&mut self, input: &[u8], mut emit: F)
    where
        F: FnMut(&[u8]),
    {
        input.iter().copied().filter_map(digit).for_each(|d| {
            if let Some(bytes) = self.push(d) {
                emit(&bytes);
            }
        });
    }

    /// The bytes of the trailing partial group: `m - 1` bytes for `m`
    /// pending digits, none for a lone digit.
    fn tail(&self) -> ([u8; BYTES_PER_BLOCK], usize) {
        ((self.word as u32).to_le_bytes(), self.digits.saturating_sub(1))
    }

    /// Decodes every complete group in `input`, appending the bytes to
    /// `output`.
    pub fn update(&mut self, input: impl AsRef<[u8]>, output: &mut Vec<u8>) {
        self.feed(input.as_ref(), |bytes| output.extend_from_slice(bytes));
    }

    /// Decodes the trailing partial group, if any.
    pub fn finish(self, output: &mut Vec<u8>) {
        let (bytes, len) = self.tail();
        output.extend_from_slice(&bytes[..len]);
    }
}

/// Decodes `input` into `output` and returns the number of bytes written.
///
/// `output` must hold at least [`decoded_len_filtered(input)`] bytes;
/// otherwise [`Error::BufferTooSmall`] is returned and `output` is left
/// untouched.
pub fn decode_into(input: impl AsRef<[u8]>, output: &mut [u8]) -> Result<usize> {
    let input = input.as_ref();
    let required = decoded_len_filtered(input);
    if output.len() < required {
        return Err(Error::BufferTooSmall {
            required,
            available: output.len(),
        });
    }

    let mut written = 0;
    let mut decoder = Decoder::new();
    let mut emit = |bytes: &[u8]| {
        output[written..written + bytes.len()].copy_from_slice(bytes);
        written += bytes.len();
    };
    decoder.feed(input, &mut emit);
    let (bytes, len) = decoder.tail();
    emit(&bytes[..len]);
    debug_assert_eq!(written, required);
    Ok(written)
}

/// Decodes `input`, which may be a [`str`] or a byte slice.
pub fn decode_to_vec(input: impl AsRef<[u8]>) -> Vec<u8> {
    let input = input.as_ref();
    let mut output = Vec::with_capacity(decoded_len_filtered(input));
    let mut decoder = Decoder::new();
    decoder.update(input, &mut output);
    decoder.finish(&mut output);
    output
}

/// Iterator returned by [`decode_bytes`].
pub struct ByteDecoder<I> {
    iter: Fuse<I>,
    decoder: Decoder,
    bytes: [u8; BYTES_PER_BLOCK],
    pos: usize,
    len: usize,
    done: bool,
}

impl<I: Iterator<Item = u8>> ByteDecoder<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
            decoder: Decoder::new(),
            bytes: [0; BYTES_PER_BLOCK],
            pos: 0,
            len: 0,
            done: false,
        }
    }

    fn load(&mut self, bytes: [u8; BYTES_PER_BLOCK], len: usize) -> Option<u8> {
        self.bytes = bytes;
        self.len = len;
        self.pos = 0;
        self.next_buffered()
    }

    fn next_buffered(&mut self) -> Option<u8> {
        let b = self.bytes[..self.len].get(self.pos).copied();
        self.pos += b.is_some() as usize;
        b
    }
}

impl<I> Iterator for ByteDecoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(b) = self.next_buffered() {
            return Some(b);
        }
        while let Some(c) = self.iter.next() {
            if let Some(bytes) = digit(c).and_then(|d| self.decoder.push(d)) {
                return self.load(bytes, BYTES_PER_BLOCK);
            }
        }
        if self.done {
            return None;
        }
        self.done = true;
        let (bytes, len) = self.decoder.tail();
        self.decoder = Decoder::new();
        self.load(bytes, len)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.len - self.pos;
        let (_, upper) = self.iter.size_hint();
        // Any of the remaining characters may be skipped, so only what is
        // already buffered is guaranteed.
        (
            buffered,
            upper
                .and_then(|n| n.checked_add(self.decoder.pending_digits()))
                .map(decoded_len_usize)
                .and_then(|n| n.checked_add(buffered)),
        )
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for ByteDecoder<I> {}

/// Lazily decodes a sequence of characters given as bytes.
pub fn decode_bytes<I>(chars: I) -> ByteDecoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    ByteDecoder::new(chars.into_iter())
}
