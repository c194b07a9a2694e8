// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{compose, Error};
use byteorder::{ByteOrder, LittleEndian};
use fwcut_layout::{VersionTag, HEADER_CHECKSUM};
use log::info;
use std::path::Path;

/// Cuts `size` bytes at `start` out of `src` and writes the composed image
/// to `dest`.
///
/// Refuses with [`Error::SectionOutOfRange`] if the source file does not
/// cover the requested section; a short file is never silently truncated
/// into a short image.
pub fn cut_image(
    src: &Path,
    dest: &Path,
    start: u32,
    size: u32,
    version: VersionTag,
    timestamp: u32,
    with_metadata: bool,
) -> Result<(), Error> {
    let bytes = std::fs::read(src)?;

    let end = u64::from(start) + u64::from(size);
    let len = bytes.len() as u64;
    if end > len {
        return Err(Error::SectionOutOfRange {
            start: start.into(),
            end,
            len,
        });
    }
    let code = &bytes[start as usize..end as usize];

    info!("start offset: {:#x}", start);
    info!("section size: {:#x}", size);
    info!("end offset:   {:#x}", end);

    let image = compose::compose(code, version, timestamp, with_metadata)?;

    if with_metadata {
        info!("signature:    {:#010x}", version.to_word());
        info!("timestamp:    {}", timestamp);
        info!(
            "image crc:    {:#010x}",
            LittleEndian::read_u32(&image[HEADER_CHECKSUM])
        );
    } else {
        info!("metadata block not written");
    }

    std::fs::write(dest, &image)?;
    Ok(())
}
