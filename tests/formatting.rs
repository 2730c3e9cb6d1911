//! Encoding through the line formatter and decoding the formatted text.

use std::io::Write;
use std::num::NonZeroUsize;

use base85::format::{FormatConfig, FormatWriter, LineStyle};
use base85::stream::{DecodeWriter, EncodeWriter};
use base85::{decode_to_vec, encode_to_vec};

fn encode_formatted(input: &[u8], style: LineStyle, width: usize, chunk: usize) -> Vec<u8> {
    let mut config = FormatConfig::new();
    config.style = style;
    config.width = NonZeroUsize::new(width).unwrap();
    let mut writer = EncodeWriter::new(FormatWriter::new(Vec::new(), config));
    for piece in input.chunks(chunk) {
        writer.write_all(piece).unwrap();
    }
    writer.finish().unwrap().finish().unwrap()
}

#[test]
fn line_lengths() {
    let input: Vec<u8> = (0..=255).collect();
    let encoded = encode_to_vec(&input);
    let output = encode_formatted(&input, LineStyle::Plain, 75, 1000);
    let text = String::from_utf8(output).unwrap();
    assert!(text.ends_with('\n'));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), (encoded.len() + 74) / 75);
    assert!(lines[..lines.len() - 1].iter().all(|l| l.len() == 75));
    assert_eq!(lines.concat().as_bytes(), &encoded[..]);
}

#[test]
fn c_string_lines() {
    let output = encode_formatted(b"Hello, world!", LineStyle::CString, 8, 3);
    assert_eq!(output, b"\"nv0<YpcW\"\n\"Oc8PdNWX\"\n\"0\"\n");
}

#[test]
fn raw_ignores_width() {
    let output = encode_formatted(b"Hello, world!", LineStyle::Raw, 2, 5);
    assert_eq!(output, b"nv0<YpcWOc8PdNWX0");
}

#[test]
fn formatted_round_trip() {
    let input: Vec<u8> = (0..5000_u32).map(|i| (i * 31 % 253) as u8).collect();
    for &style in &[LineStyle::Raw, LineStyle::Plain, LineStyle::CString] {
        for &(width, chunk) in &[(1, 7), (4, 1000), (75, 3), (80, 4096)] {
            let output = encode_formatted(&input, style, width, chunk);
            assert_eq!(decode_to_vec(&output), input, "{:?} {} {}", style, width, chunk);

            let mut writer = DecodeWriter::new(Vec::new());
            for piece in output.chunks(chunk) {
                writer.write_all(piece).unwrap();
            }
            assert_eq!(writer.finish().unwrap(), input);
        }
    }
}
