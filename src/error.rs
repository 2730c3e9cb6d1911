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

//! Errors reported by the length functions and the slice-based codecs.

use thiserror::Error;

/// An error encountered while computing a length or writing into a
/// caller-provided buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A length argument was negative.
    #[error("invalid length: {0}")]
    InvalidLength(i128),
    /// A length, or the encoded length derived from it, does not fit in a
    /// `usize`.
    #[error("length overflow: {0}")]
    Overflow(u128),
    /// The output buffer cannot hold the result.
    #[error("output buffer too small: need {required}, have {available}")]
    BufferTooSmall { required: usize, available: usize },
}

/// Alias of <code>[Result]\<T, [Error]></code>.
pub type Result<T> = core::result::Result<T, Error>;
