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

//! Line wrapping and quoting for encoded output.
//!
//! Every character added here (`"` and `\n`) lies outside the alphabet, so
//! formatted output decodes without any preprocessing.

use super::stream::dump;

use std::io::{self, Write};
use std::num::NonZeroUsize;

/// How encoded characters are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// Characters only; no line breaks and no trailing newline.
    Raw,
    /// Lines of at most [`FormatConfig::width`] characters, each ending in
    /// a newline.
    Plain,
    /// Like [`Plain`](Self::Plain), but each line is enclosed in double
    /// quotes, forming a sequence of C string literals.
    CString,
}

/// Used by [`FormatWriter`] to configure the output layout.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct FormatConfig {
    /// [default: [`LineStyle::Plain`]]
    pub style: LineStyle,
    /// Maximum number of encoded characters per line, not counting quotes
    /// or the newline. Ignored for [`LineStyle::Raw`]. [default: 75]
    pub width: NonZeroUsize,
}

impl FormatConfig {
    pub const DEFAULT_WIDTH: NonZeroUsize = match NonZeroUsize::new(75) {
        Some(width) => width,
        None => panic!("zero default width"),
    };

    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            style: LineStyle::Plain,
            width: Self::DEFAULT_WIDTH,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes encoded characters to `W`, breaking and quoting lines according
/// to a [`FormatConfig`].
///
/// A line break is only written once a character follows it, so output
/// whose length is a multiple of the width does not end with an empty line.
/// [`finish`](Self::finish) terminates the last line. As with the
/// [`stream`](crate::stream) adapters, output the inner writer rejects is
/// kept and sent first on the next call.
pub struct FormatWriter<W: Write> {
    inner: W,
    config: FormatConfig,
    col: usize,
    buf: Vec<u8>,
}

impl<W: Write> FormatWriter<W> {
    pub fn new(inner: W, config: FormatConfig) -> Self {
        Self {
            inner,
            config,
            col: 0,
            buf: Vec::new(),
        }
    }

    fn quoted(&self) -> bool {
        self.config.style == LineStyle::CString
    }

    fn layout(&mut self, mut data: &[u8]) {
        if self.config.style == LineStyle::Raw {
            self.buf.extend_from_slice(data);
            return;
        }
        let width = self.config.width.get();
        let quoted = self.quoted();
        while !data.is_empty() {
            if self.col == width {
                if quoted {
                    self.buf.push(b'"');
                }
                self.buf.push(b'\n');
                self.col = 0;
            }
            if self.col == 0 && quoted {
                self.buf.push(b'"');
            }
            let n = (width - self.col).min(data.len());
            self.buf.extend_from_slice(&data[..n]);
            self.col += n;
            data = &data[n..];
        }
    }

    /// Terminates the last line (unless the style is raw or nothing was
    /// written) and sends all pending output. Can be called again after an
    /// error.
    pub fn try_finish(&mut self) -> io::Result<()> {
        if self.config.style != LineStyle::Raw && self.col > 0 {
            if self.quoted() {
                self.buf.push(b'"');
            }
            self.buf.push(b'\n');
            self.col = 0;
        }
        dump(&mut self.inner, &mut self.buf)?;
        self.inner.flush()
    }

    /// Like [`try_finish`](Self::try_finish), but returns the inner
    /// writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.try_finish()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for FormatWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        dump(&mut self.inner, &mut self.buf)?;
        self.layout(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        dump(&mut self.inner, &mut self.buf)?;
        self.inner.flush()
    }
}
