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

use super::BASE;

/// A single base-85 digit. Always less than 85.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    /// # Safety
    ///
    /// `x` must be less than 85.
    pub unsafe fn new_unchecked(x: u8) -> Self {
        debug_assert!(u32::from(x) < BASE);
        Self(x)
    }

    /// Checked constructor usable in constant expressions. Fails
    /// compilation (or panics at run time) if `x` is out of range.
    pub const fn from_const(x: u8) -> Self {
        assert!((x as u32) < BASE, "base-85 digit out of range");
        Self(x)
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl From<Digit> for u64 {
    fn from(d: Digit) -> u64 {
        u64::from(d.0)
    }
}
