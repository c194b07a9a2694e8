// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fwcut_image::{cut, verify};
use fwcut_layout::VersionTag;
use log::info;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Parser)]
struct ImageArgs {
    #[clap(short = 'i', long = "in", help = "source firmware blob (binary)")]
    src_bin: PathBuf,
    #[clap(short = 'o', long = "out", help = "output image file (binary)")]
    dest_bin: PathBuf,
}

#[derive(Debug, Parser)]
enum Command {
    /// Cut a section out of a firmware blob into a standalone image
    Cut {
        #[clap(flatten)]
        image: ImageArgs,

        /// Byte offset of the section start (hex accepted)
        #[arg(long, value_parser = parse_int::parse::<u32>)]
        start: u32,

        /// Section size in bytes (hex accepted)
        #[arg(long, value_parser = parse_int::parse::<u32>)]
        size: u32,

        /// 16-bit image signature (hex accepted)
        #[arg(long, value_parser = parse_int::parse::<u16>, default_value = "0")]
        signature: u16,

        /// Major version (0-255)
        #[arg(long, default_value_t = 0)]
        major: u8,

        /// Minor version (0-255)
        #[arg(long, default_value_t = 0)]
        minor: u8,

        /// Prepend the 64-byte metadata block
        #[arg(long)]
        with_metadata: bool,
    },
    /// Check the metadata block of a previously cut image
    Verify {
        src_img: PathBuf,
    },
}

#[derive(Debug, Parser)]
struct Opts {
    #[clap(subcommand)]
    cmd: Command,
}

fn main() -> Result<()> {
    let cmd = Opts::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cmd.cmd {
        Command::Cut {
            image,
            start,
            size,
            signature,
            major,
            minor,
            with_metadata,
        } => {
            let version = VersionTag::new(signature, major, minor);
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as u32;

            info!("input file:   {}", image.src_bin.display());
            info!("version:      {major}.{minor}");

            cut::cut_image(
                &image.src_bin,
                &image.dest_bin,
                start,
                size,
                version,
                timestamp,
                with_metadata,
            )
            .with_context(|| format!("could not cut {}", image.src_bin.display()))?;

            info!("image written to {}", image.dest_bin.display());
        }
        Command::Verify { src_img } => {
            let bytes = std::fs::read(&src_img)
                .with_context(|| format!("could not open {}", src_img.display()))?;

            match verify::verify_image(&bytes) {
                Ok(meta) => {
                    info!("signature:    {:#06x}", meta.version.signature);
                    info!("version:      {}.{}", meta.version.major, meta.version.minor);
                    info!("timestamp:    {}", meta.timestamp);
                    info!("image crc:    {:#010x}", meta.checksum);
                    info!("code length:  {} bytes", meta.code_length);
                    info!("{} verified", src_img.display());
                }
                Err(e) => {
                    println!("{}: {e}", "FAILED".red());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
