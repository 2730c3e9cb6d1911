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

use std::fs::File;
use std::io::{self, stdin, stdout, BufWriter, Read, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Context, Result};
use base85::format::{FormatConfig, FormatWriter, LineStyle};
use base85::stream::{DecodeWriter, EncodeWriter};
use clap::Parser;
use log::{debug, info};

/// Encodes or decodes base-85 data from [FILE] and writes the result to
/// standard output. If [FILE] is missing or "-", the data is read from
/// standard input.
#[derive(Parser, Debug)]
#[command(name = "base85", version)]
struct Cli {
    /// Decode data instead of encoding
    #[arg(short, long, conflicts_with_all = ["raw", "c_string"])]
    decode: bool,

    /// Raw mode: output base-85 characters only (no formatting)
    #[arg(short, long, conflicts_with = "c_string")]
    raw: bool,

    /// Output as C strings (lines surrounded by double quotes)
    #[arg(short, long = "c-string")]
    c_string: bool,

    /// Maximum number of base-85 characters per line, excluding
    /// formatting. Ignored in raw mode.
    #[arg(short, long, value_name = "WIDTH", default_value_t = FormatConfig::DEFAULT_WIDTH)]
    width: NonZeroUsize,

    /// Log level (error|warn|info|debug|trace)
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Input file
    file: Option<PathBuf>,
}

impl Cli {
    fn format_config(&self) -> FormatConfig {
        let mut config = FormatConfig::new();
        config.width = self.width;
        config.style = if self.raw {
            LineStyle::Raw
        } else if self.c_string {
            LineStyle::CString
        } else {
            LineStyle::Plain
        };
        config
    }
}

fn init_logger(level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    let _ = builder.try_init();
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) if path != Path::new("-") => {
            info!("reading from {}", path.display());
            let file = File::open(path).with_context(|| {
                format!("could not open file '{}'", path.display())
            })?;
            Ok(Box::new(file))
        }
        _ => {
            info!("reading from standard input");
            Ok(Box::new(stdin()))
        }
    }
}

/// Copies `input` into `writer`, keeping read and write failures apart.
fn pump(input: &mut impl Read, writer: &mut impl Write) -> Result<u64> {
    let mut buf = [0; 8192];
    let mut total = 0;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("could not read input"),
        };
        writer
            .write_all(&buf[..n])
            .context("could not write to standard output")?;
        total += n as u64;
    }
}

fn encode(mut input: impl Read, output: impl Write, config: FormatConfig) -> Result<()> {
    debug!("encoding with {:?}", config);
    let mut writer = EncodeWriter::new(FormatWriter::new(output, config));
    let copied = pump(&mut input, &mut writer)?;
    debug!("read {} bytes", copied);
    writer
        .finish()
        .and_then(FormatWriter::finish)
        .context("could not write to standard output")?;
    Ok(())
}

fn decode(mut input: impl Read, output: impl Write) -> Result<()> {
    let mut writer = DecodeWriter::new(output);
    let copied = pump(&mut input, &mut writer)?;
    debug!("read {} characters", copied);
    writer.finish().context("could not write to standard output")?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let input = open_input(cli.file.as_deref())?;
    let stdout = stdout();
    let output = BufWriter::new(stdout.lock());
    if cli.decode {
        decode(input, output)
    } else {
        encode(input, output, cli.format_config())
    }
}

fn error_message(e: &anyhow::Error) -> String {
    format!("error: {:#}", e)
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.log_level.as_deref());
    if let Err(e) = run(cli) {
        eprintln!("{}", error_message(&e));
        exit(1);
    }
}
