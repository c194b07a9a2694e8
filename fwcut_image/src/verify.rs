// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-side check of a cut image, the same way the bootloader checks it:
//! unpack the metadata block, compare the declared code length against the
//! payload, recompute the CRC.

use crate::{checksum, Error};
use fwcut_layout::{MetadataHeader, VersionTag, HEADER_FIELDS_SIZE, METADATA_SIZE};
use packed_struct::prelude::*;

/// Decoded metadata fields of an image that passed verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub version: VersionTag,
    pub timestamp: u32,
    pub checksum: u32,
    pub code_length: u32,
}

pub fn verify_image(image: &[u8]) -> Result<ImageInfo, Error> {
    if image.len() < METADATA_SIZE {
        return Err(Error::TruncatedImage(image.len()));
    }

    let mut fields = [0u8; HEADER_FIELDS_SIZE];
    fields.copy_from_slice(&image[..HEADER_FIELDS_SIZE]);
    let header = MetadataHeader::unpack(&fields)?;

    let code = &image[METADATA_SIZE..];
    if header.code_length as usize != code.len() {
        return Err(Error::CodeLengthMismatch {
            header: header.code_length,
            actual: code.len(),
        });
    }

    let computed = checksum::crc32(code);
    if computed != header.checksum {
        return Err(Error::ChecksumMismatch {
            header: header.checksum,
            computed,
        });
    }

    Ok(ImageInfo {
        version: header.version_tag(),
        timestamp: header.timestamp,
        checksum: header.checksum,
        code_length: header.code_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;

    const CODE: &[u8] = b"firmware section under test";

    #[test]
    fn accepts_a_freshly_composed_image() {
        let tag = VersionTag::new(0xABCD, 3, 7);
        let image = compose(CODE, tag, 1_714_000_000, true).unwrap();

        let info = verify_image(&image).unwrap();
        assert_eq!(info.version, tag);
        assert_eq!(info.timestamp, 1_714_000_000);
        assert_eq!(info.checksum, checksum::crc32(CODE));
        assert_eq!(info.code_length, CODE.len() as u32);
    }

    #[test]
    fn rejects_a_corrupted_payload() {
        let tag = VersionTag::new(0xABCD, 1, 0);
        let mut image = compose(CODE, tag, 5, true).unwrap();
        image[METADATA_SIZE + 3] ^= 0x40;

        let err = verify_image(&image).unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[test]
    fn rejects_a_truncated_payload() {
        let tag = VersionTag::new(0xABCD, 1, 0);
        let mut image = compose(CODE, tag, 5, true).unwrap();
        image.pop();

        let err = verify_image(&image).unwrap_err();
        assert!(matches!(err, Error::CodeLengthMismatch { .. }));
    }

    #[test]
    fn rejects_an_image_shorter_than_the_block() {
        let err = verify_image(&[0u8; METADATA_SIZE - 1]).unwrap_err();
        assert!(matches!(err, Error::TruncatedImage(63)));
    }
}
