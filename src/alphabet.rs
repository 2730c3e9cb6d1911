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

//! The base-85 character set and its inverse lookup table.

use super::Digit;

use core::convert::TryFrom;

/// The 85 characters of the encoding, in digit order: the character for
/// digit `i` is `ALPHABET[i]`.
pub const ALPHABET: &[u8; 85] = b"\
    0123456789\
    ABCDEFGHIJKLMNOPQRSTUVWXYZ\
    abcdefghijklmnopqrstuvwxyz\
    $%&()*+-:;<=>@[]^_`{|}~";

// Indexed by raw byte value. Bytes outside the alphabet (including every
// byte >= 0x80) map to `None`.
static CODES: [Option<Digit>; 256] = build_codes(ALPHABET);

const fn build_codes(alphabet: &[u8; 85]) -> [Option<Digit>; 256] {
    let mut codes = [None; 256];
    let mut i = 0;
    while i < alphabet.len() {
        let c = alphabet[i];
        assert!(c.is_ascii_graphic(), "alphabet contains a non-printable character");
        assert!(codes[c as usize].is_none(), "alphabet contains a duplicate character");
        codes[c as usize] = Some(Digit::from_const(i as u8));
        i += 1;
    }
    codes
}

pub(crate) fn digit(c: u8) -> Option<Digit> {
    CODES[usize::from(c)]
}

pub(crate) fn char_for(d: Digit) -> u8 {
    ALPHABET[usize::from(u8::from(d))]
}

/// Returns the digit value (0 to 84) of `c`, or `None` if `c` is not part of
/// the alphabet.
pub fn code(c: u8) -> Option<u8> {
    digit(c).map(u8::from)
}

/// Whether `c` is one of the 85 characters of the encoding.
pub fn is_alphabet_member(c: u8) -> bool {
    digit(c).is_some()
}

/// Like [`is_alphabet_member`], but takes a [`char`].
pub fn is_alphabet_char(c: char) -> bool {
    u8::try_from(c).map_or(false, is_alphabet_member)
}
