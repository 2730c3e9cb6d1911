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

//! Length arithmetic for encoded and decoded data.

use super::alphabet::is_alphabet_member;
use super::error::{Error, Result};
use super::{BYTES_PER_BLOCK, DIGITS_PER_BLOCK};

use core::convert::TryFrom;

mod sealed {
    pub trait Sealed {}
}

/// Integer types accepted as length arguments.
///
/// Negative values are rejected with [`Error::InvalidLength`] and values
/// that do not fit in a `usize` with [`Error::Overflow`].
pub trait Length: Copy + sealed::Sealed {
    fn to_len(self) -> Result<usize>;
}

macro_rules! impl_unsigned_length {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Length for $t {
            fn to_len(self) -> Result<usize> {
                usize::try_from(self).map_err(|_| Error::Overflow(self as u128))
            }
        }
    )*};
}

macro_rules! impl_signed_length {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Length for $t {
            fn to_len(self) -> Result<usize> {
                if self < 0 {
                    return Err(Error::InvalidLength(self as i128));
                }
                usize::try_from(self).map_err(|_| Error::Overflow(self as u128))
            }
        }
    )*};
}

impl_unsigned_length!(u8, u16, u32, u64, usize);
impl_signed_length!(i8, i16, i32, i64, isize);

/// Number of digits produced by a trailing block of `rem` bytes.
fn partial_digits(rem: usize) -> usize {
    if rem == 0 {
        0
    } else {
        rem + 1
    }
}

pub(crate) fn decoded_len_usize(n: usize) -> usize {
    n / DIGITS_PER_BLOCK * BYTES_PER_BLOCK
        + (n % DIGITS_PER_BLOCK).saturating_sub(1)
}

/// Returns the number of characters needed to encode `n` bytes.
///
/// Fails with [`Error::Overflow`] if the result does not fit in a `usize`.
/// This never happens for the length of an existing slice.
pub fn encoded_len<N: Length>(n: N) -> Result<usize> {
    let n = n.to_len()?;
    (n / BYTES_PER_BLOCK)
        .checked_mul(DIGITS_PER_BLOCK)
        .and_then(|len| len.checked_add(partial_digits(n % BYTES_PER_BLOCK)))
        .ok_or(Error::Overflow(n as u128))
}

/// Returns the number of bytes decoded from `n` alphabet characters.
///
/// A single trailing character carries no data and is not counted.
pub fn decoded_len<N: Length>(n: N) -> Result<usize> {
    n.to_len().map(decoded_len_usize)
}

/// Like [`decoded_len`], but counts only the characters of `input` that
/// belong to the alphabet, as the decoder skips all others.
pub fn decoded_len_filtered(input: impl AsRef<[u8]>) -> usize {
    let n = input.as_ref().iter().filter(|&&c| is_alphabet_member(c)).count();
    decoded_len_usize(n)
}
