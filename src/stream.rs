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

//! [`Write`] adapters that encode or decode everything written to them.
//!
//! Output the inner writer does not accept is kept and sent before anything
//! else on the next `write`, `flush` or `try_finish`. A `write` that returns
//! an error has consumed none of its input, so it can simply be retried.

use super::decode::Decoder;
use super::encode::Encoder;

use log::{debug, trace};
use std::io::{self, Write};
use std::mem;

/// Sends all of `buf` to `inner`, removing what was written. On error the
/// unsent remainder stays in `buf`.
pub(crate) fn dump<W: Write>(inner: &mut W, buf: &mut Vec<u8>) -> io::Result<()> {
    while !buf.is_empty() {
        let n = inner.write(buf)?;
        if n == 0 {
            return Err(io::ErrorKind::WriteZero.into());
        }
        buf.drain(..n);
    }
    Ok(())
}

/// Encodes bytes written to it and forwards the characters to `W`.
///
/// Writes may be split anywhere; bytes that do not complete a block are
/// held until more arrive. [`finish`](Self::finish) (or
/// [`try_finish`](Self::try_finish)) must be called to encode the final
/// partial block.
pub struct EncodeWriter<W: Write> {
    inner: W,
    encoder: Encoder,
    buf: Vec<u8>,
    bytes_in: u64,
    chars_out: u64,
}

impl<W: Write> EncodeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            encoder: Encoder::new(),
            buf: Vec::new(),
            bytes_in: 0,
            chars_out: 0,
        }
    }

    /// Encodes the final partial block and sends all pending output.
    ///
    /// Can be called again after an error; the partial block is only
    /// encoded once.
    pub fn try_finish(&mut self) -> io::Result<()> {
        let len = self.buf.len();
        mem::take(&mut self.encoder).finish(&mut self.buf);
        self.chars_out += (self.buf.len() - len) as u64;
        dump(&mut self.inner, &mut self.buf)?;
        self.inner.flush()
    }

    /// Like [`try_finish`](Self::try_finish), but returns the inner
    /// writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.try_finish()?;
        debug!("encoded {} bytes into {} characters", self.bytes_in, self.chars_out);
        Ok(self.inner)
    }
}

impl<W: Write> Write for EncodeWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        dump(&mut self.inner, &mut self.buf)?;
        self.encoder.update(data, &mut self.buf);
        trace!("encoded chunk: {} bytes -> {} characters", data.len(), self.buf.len());
        self.bytes_in += data.len() as u64;
        self.chars_out += self.buf.len() as u64;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        dump(&mut self.inner, &mut self.buf)?;
        self.inner.flush()
    }
}

/// Decodes characters written to it and forwards the bytes to `W`.
///
/// Characters outside the alphabet are skipped, and a group split across
/// writes is carried over. [`finish`](Self::finish) (or
/// [`try_finish`](Self::try_finish)) must be called to decode the final
/// partial group.
pub struct DecodeWriter<W: Write> {
    inner: W,
    decoder: Decoder,
    buf: Vec<u8>,
    chars_in: u64,
    bytes_out: u64,
}

impl<W: Write> DecodeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            decoder: Decoder::new(),
            buf: Vec::new(),
            chars_in: 0,
            bytes_out: 0,
        }
    }

    /// Decodes the final partial group and sends all pending output.
    ///
    /// Can be called again after an error; the partial group is only
    /// decoded once.
    pub fn try_finish(&mut self) -> io::Result<()> {
        let decoder = mem::take(&mut self.decoder);
        if decoder.pending_digits() == 1 {
            debug!("discarding a lone trailing digit");
        }
        let len = self.buf.len();
        decoder.finish(&mut self.buf);
        self.bytes_out += (self.buf.len() - len) as u64;
        dump(&mut self.inner, &mut self.buf)?;
        self.inner.flush()
    }

    /// Like [`try_finish`](Self::try_finish), but returns the inner
    /// writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.try_finish()?;
        debug!("decoded {} characters into {} bytes", self.chars_in, self.bytes_out);
        Ok(self.inner)
    }
}

impl<W: Write> Write for DecodeWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        dump(&mut self.inner, &mut self.buf)?;
        self.decoder.update(data, &mut self.buf);
        trace!("decoded chunk: {} characters -> {} bytes", data.len(), self.buf.len());
        self.chars_in += data.len() as u64;
        self.bytes_out += self.buf.len() as u64;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        dump(&mut self.inner, &mut self.buf)?;
        self.inner.flush()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{retry, write_retrying, FlakySink};
    use super::*;
    use crate::{decode_to_vec, encode_to_vec};

    #[test]
    fn encode_writer() -> io::Result<()> {
        let input: Vec<u8> = (0..1000_u32).map(|i| (i % 256) as u8).collect();
        for size in [1, 3, 4, 7, 1000] {
            let mut writer = EncodeWriter::new(Vec::new());
            input.chunks(size).try_for_each(|chunk| writer.write_all(chunk))?;
            assert_eq!(writer.finish()?, encode_to_vec(&input), "chunk size {}", size);
        }
        Ok(())
    }

    #[test]
    fn decode_writer() -> io::Result<()> {
        let input = b"nv0<Y\"\npcWOc\n 8PdNWX0";
        for size in [1, 2, 5, 6, input.len()] {
            let mut writer = DecodeWriter::new(Vec::new());
            input.chunks(size).try_for_each(|chunk| writer.write_all(chunk))?;
            assert_eq!(writer.finish()?, decode_to_vec(input), "chunk size {}", size);
        }
        Ok(())
    }

    #[test]
    fn chained() -> io::Result<()> {
        let mut writer = EncodeWriter::new(DecodeWriter::new(Vec::new()));
        writer.write_all(b"Hello, ")?;
        writer.write_all(b"world!")?;
        assert_eq!(writer.finish()?.finish()?, b"Hello, world!");
        Ok(())
    }

    #[test]
    fn encode_writer_failed_write_consumes_nothing() {
        let mut writer = EncodeWriter::new(FlakySink::new(&[0], usize::MAX));
        write_retrying(&mut writer, b"he");
        write_retrying(&mut writer, b"ll");
        // "hell" is pending; the sink rejects it once.
        assert!(writer.write(b"o").is_err());
        write_retrying(&mut writer, b"o");
        let sink = writer.finish().unwrap();
        assert_eq!(decode_to_vec(&sink.out), b"hello");
        assert_eq!(sink.out, encode_to_vec("hello"));
    }

    #[test]
    fn encode_writer_short_and_failed_writes() {
        let input: Vec<u8> = (0..=255).collect();
        let mut writer = EncodeWriter::new(FlakySink::new(&[0, 2, 3, 7, 20], 3));
        input.chunks(5).for_each(|chunk| write_retrying(&mut writer, chunk));
        retry(|| writer.try_finish());
        assert_eq!(writer.finish().unwrap().out, encode_to_vec(&input));
    }

    #[test]
    fn decode_writer_failed_write_consumes_nothing() {
        let encoded = encode_to_vec("Hello, world!");
        let mut writer = DecodeWriter::new(FlakySink::new(&[0, 1, 4], 2));
        encoded.chunks(3).for_each(|chunk| write_retrying(&mut writer, chunk));
        retry(|| writer.flush());
        retry(|| writer.try_finish());
        assert_eq!(writer.finish().unwrap().out, b"Hello, world!");
    }

    #[test]
    fn try_finish_encodes_tail_once() {
        // Call 0 is the first write of the tail inside `try_finish`.
        let mut writer = EncodeWriter::new(FlakySink::new(&[0], usize::MAX));
        write_retrying(&mut writer, b"abc");
        assert!(writer.try_finish().is_err());
        writer.try_finish().unwrap();
        assert_eq!(writer.finish().unwrap().out, b"dfpA");
    }
}
