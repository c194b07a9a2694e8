// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{checksum, Error};
use fwcut_layout::{MetadataHeader, VersionTag, HEADER_FIELDS_SIZE, METADATA_SIZE};
use packed_struct::prelude::*;

/// Assembles the output image from an already-extracted code section.
///
/// With `with_metadata` unset the image is the code bytes, untouched. Set, it
/// is a [`METADATA_SIZE`]-byte block followed by the code: the defined header
/// fields at the front, the reserved tail left zero.
pub fn compose(
    code: &[u8],
    version: VersionTag,
    timestamp: u32,
    with_metadata: bool,
) -> Result<Vec<u8>, Error> {
    if !with_metadata {
        return Ok(code.to_vec());
    }

    let code_length = u32::try_from(code.len()).map_err(|_| Error::SectionLengthOverflow)?;

    let header = MetadataHeader {
        version: version.to_word(),
        timestamp,
        checksum: checksum::crc32(code),
        code_length,
    };

    let mut image = vec![0u8; METADATA_SIZE + code.len()];
    image[..HEADER_FIELDS_SIZE].copy_from_slice(&header.pack()?);
    image[METADATA_SIZE..].copy_from_slice(code);
    Ok(image)
}
