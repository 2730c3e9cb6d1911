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

//! Functions and types for encoding base-85 data.

use super::alphabet::char_for;
use super::error::{Error, Result};
use super::len::encoded_len;
use super::Digit;
use super::{BASE, BYTES_PER_BLOCK, DIGITS_PER_BLOCK};

use core::iter::{Fuse, FusedIterator};

/// Reads up to four bytes as a little-endian integer. Missing high bytes are
/// zero.
fn read_block(block: &[u8]) -> u32 {
    debug_assert!(block.len() <= BYTES_PER_BLOCK);
    block.iter().rev().fold(0, |word, &b| word << 8 | u32::from(b))
}

/// Writes `word` as five alphabet characters, least significant digit first.
fn encode_word(mut word: u32) -> [u8; DIGITS_PER_BLOCK] {
    let mut chars = [0; DIGITS_PER_BLOCK];
    chars.iter_mut().for_each(|c| {
        // SAFETY: `word % 85` is always less than 85.
        *c = char_for(unsafe { Digit::new_unchecked((word % BASE) as u8) });
        word /= BASE;
    });
    chars
}

/// Encodes one block of one to four bytes. A block of `k` bytes yields
/// `k + 1` characters, so a full block yields five.
fn encode_block(block: &[u8]) -> ([u8; DIGITS_PER_BLOCK], usize) {
    (encode_word(read_block(block)), block.len() + 1)
}

fn extend_encoded(input: &[u8], output: &mut Vec<u8>) {
    input.chunks(BYTES_PER_BLOCK).for_each(|block| {
        let (chars, len) = encode_block(block);
        output.extend_from_slice(&chars[..len]);
    });
}

/// Encodes `input` into `output` and returns the number of characters
/// written.
///
/// `output` must hold at least [`encoded_len(input.len())`](encoded_len)
/// characters; otherwise [`Error::BufferTooSmall`] is returned and `output`
/// is left untouched.
pub fn encode_into(input: impl AsRef<[u8]>, output: &mut [u8]) -> Result<usize> {
    let input = input.as_ref();
    let required = encoded_len(input.len())?;
    if output.len() < required {
        return Err(Error::BufferTooSmall {
            required,
            available: output.len(),
        });
    }

    let mut written = 0;
    input.chunks(BYTES_PER_BLOCK).for_each(|block| {
        let (chars, len) = encode_block(block);
        output[written..written + len].copy_from_slice(&chars[..len]);
        written += len;
    });
    debug_assert_eq!(written, required);
    Ok(written)
}

/// Encodes `input` and returns the characters as bytes.
pub fn encode_to_vec(input: impl AsRef<[u8]>) -> Vec<u8> {
    let input = input.as_ref();
    let mut output = Vec::with_capacity(encoded_len(input.len()).unwrap_or(0));
    extend_encoded(input, &mut output);
    output
}

/// Encodes `input` and returns the result as a [`String`].
pub fn encode_to_string(input: impl AsRef<[u8]>) -> String {
    let ascii = encode_to_vec(input);

    #[cfg(debug_assertions)]
    let ascii = String::from_utf8(ascii)
        .expect("[debug] encoded data is not valid ascii -- this is UB!")
        .into_bytes();

    // SAFETY: Every alphabet character is ASCII.
    unsafe { String::from_utf8_unchecked(ascii) }
}

/// Incremental encoder for input that arrives in pieces.
///
/// Bytes that do not yet form a complete block are held back until the next
/// call to [`update`](Self::update) or until [`finish`](Self::finish), so the
/// concatenated output is the same as encoding all the input at once,
/// regardless of how it was split.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    pending: [u8; BYTES_PER_BLOCK],
    len: usize,
}

impl Encoder {
    pub const fn new() -> Self {
        Self {
            pending: [0; BYTES_PER_BLOCK],
            len: 0,
        }
    }

    /// Number of input bytes held back waiting for a complete block.
    pub fn pending_len(&self) -> usize {
        self.len
    }

    /// Encodes as much of `input` as forms complete blocks, appending the
    /// characters to `output`.
    pub fn update(&mut self, input: impl AsRef<[u8]>, output: &mut Vec<u8>) {
        let mut input = input.as_ref();
        if self.len > 0 {
            let take = (BYTES_PER_BLOCK - self.len).min(input.len());
            self.pending[self.len..self.len + take]
                .copy_from_slice(&input[..take]);
            self.len += take;
            input = &input[take..];
            if self.len < BYTES_PER_BLOCK {
                return;
            }
            extend_encoded(&self.pending, output);
            self.len = 0;
        }

        let tail = input.len() % BYTES_PER_BLOCK;
        let (blocks, rest) = input.split_at(input.len() - tail);
        extend_encoded(blocks, output);
        self.pending[..tail].copy_from_slice(rest);
        self.len = tail;
    }

    /// Encodes the held-back partial block, if any.
    pub fn finish(self, output: &mut Vec<u8>) {
        extend_encoded(&self.pending[..self.len], output);
    }
}

/// Iterator returned by [`encode_bytes`].
pub struct ByteEncoder<I> {
    iter: Fuse<I>,
    chars: [u8; DIGITS_PER_BLOCK],
    pos: usize,
    len: usize,
}

impl<I: Iterator<Item = u8>> ByteEncoder<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
            chars: [0; DIGITS_PER_BLOCK],
            pos: 0,
            len: 0,
        }
    }
}

impl<I> Iterator for ByteEncoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos < self.len {
            self.pos += 1;
            return Some(self.chars[self.pos - 1]);
        }

        let mut block = [0; BYTES_PER_BLOCK];
        let mut num_bytes = 0;
        self.iter
            .by_ref()
            .take(BYTES_PER_BLOCK)
            .enumerate()
            .for_each(|(i, b)| {
                block[i] = b;
                num_bytes += 1;
            });

        if num_bytes == 0 {
            return None;
        }
        let (chars, len) = encode_block(&block[..num_bytes]);
        self.chars = chars;
        self.len = len;
        self.pos = 1;
        Some(chars[0])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.len - self.pos;
        let (lower, upper) = self.iter.size_hint();
        // Whatever is buffered finishes a block, so the base iterator's
        // bytes always start a fresh one.
        (
            encoded_len(lower)
                .ok()
                .and_then(|n| n.checked_add(buffered))
                .unwrap_or(usize::MAX),
            upper
                .and_then(|n| encoded_len(n).ok())
                .and_then(|n| n.checked_add(buffered)),
        )
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for ByteEncoder<I> {}

/// Lazily encodes a sequence of bytes, yielding alphabet characters as
/// bytes.
pub fn encode_bytes<I>(bytes: I) -> ByteEncoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    ByteEncoder::new(bytes.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::is_alphabet_member;

    #[test]
    fn encode() {
        assert_eq!(encode_to_string([]), "");
        assert_eq!(encode_to_string([0x00]), "00");
        assert_eq!(encode_to_string([0x00; 4]), "00000");
        assert_eq!(encode_to_string([0xff]), "03");
        assert_eq!(encode_to_string([0xff, 0xff]), "069");
        assert_eq!(encode_to_string([0xff, 0xff, 0xff]), "09RR");
        assert_eq!(encode_to_string([0xff; 4]), "0CsN|");
        assert_eq!(encode_to_string("a"), "C1");
        assert_eq!(encode_to_string("abc"), "dfpA");
        assert_eq!(encode_to_string("hello"), "{v0<YQ1");
        assert_eq!(encode_to_string("Hello, world!"), "nv0<YpcWOc8PdNWX0");
    }

    #[test]
    fn max_word_digits() {
        // 4294967295 = 0 + 12*85 + 54*85^2 + 23*85^3 + 82*85^4
        let chars = encode_word(u32::MAX);
        let digits: Vec<u8> = chars
            .iter()
            .map(|&c| crate::alphabet::code(c).unwrap())
            .collect();
        assert_eq!(digits, [0, 12, 54, 23, 82]);
    }

    #[test]
    fn into_slice() {
        let mut buf = [b'.'; 9];
        assert_eq!(encode_into("hello", &mut buf), Ok(7));
        assert_eq!(&buf, b"{v0<YQ1..");
        assert_eq!(encode_into("", &mut []), Ok(0));
    }

    #[test]
    fn into_slice_too_small() {
        let mut buf = [b'.'; 6];
        assert_eq!(
            encode_into("hello", &mut buf),
            Err(Error::BufferTooSmall {
                required: 7,
                available: 6,
            }),
        );
        assert_eq!(&buf, b"......");
    }

    #[test]
    fn incremental() {
        let input: Vec<u8> = (0..=255).collect();
        let expected = encode_to_vec(&input);
        for size in 1..=9 {
            let mut encoder = Encoder::new();
            let mut output = Vec::new();
            input.chunks(size).for_each(|chunk| {
                encoder.update(chunk, &mut output);
                assert!(encoder.pending_len() < BYTES_PER_BLOCK);
            });
            encoder.finish(&mut output);
            assert_eq!(output, expected, "chunk size {}", size);
        }
    }

    #[test]
    fn incremental_empty_updates() {
        let mut encoder = Encoder::new();
        let mut output = Vec::new();
        encoder.update([], &mut output);
        encoder.update([0xff, 0xff], &mut output);
        encoder.update([], &mut output);
        assert!(output.is_empty());
        encoder.update([0xff, 0xff, 0x00], &mut output);
        assert_eq!(output, b"0CsN|");
        encoder.finish(&mut output);
        assert_eq!(output, b"0CsN|00");
    }

    #[test]
    fn iterator() {
        let input = b"Hello, world!";
        let encoder = encode_bytes(input.iter().copied());
        assert_eq!(encoder.size_hint(), (17, Some(17)));
        let mut encoder = encoder;
        encoder.next();
        assert_eq!(encoder.size_hint(), (16, Some(16)));
        let rest: Vec<u8> = encoder.collect();
        assert_eq!(rest, b"v0<YpcWOc8PdNWX0");
        assert_eq!(encode_bytes(core::iter::empty()).next(), None);
    }

    #[test]
    fn closure() {
        let input: Vec<u8> = (0..1024_u32).map(|i| (i * 7919 % 251) as u8).collect();
        let output = encode_to_vec(&input);
        assert_eq!(output.len(), encoded_len(input.len()).unwrap());
        assert!(output.iter().all(|&c| is_alphabet_member(c)));
        assert_eq!(output, encode_bytes(input).collect::<Vec<_>>());
    }
}
