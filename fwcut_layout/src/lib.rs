// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On-wire layout of the cut-image metadata block.
//!
//! The FOTA manager and the bootloader on the device parse this block with a
//! plain struct overlay, so every offset and width here is load-bearing. All
//! multi-byte fields are little-endian, matching the Cortex-M targets this
//! tool feeds.

use packed_struct::prelude::*;
use std::ops::Range;

/// Total size of the metadata block prepended to a cut image.
///
/// Only the first [`HEADER_FIELDS_SIZE`] bytes carry defined fields; the rest
/// is reserved and must stay zero. The devices depend on the total size, not
/// on any meaning for the reserved tail.
pub const METADATA_SIZE: usize = 64;

/// Size of the defined field prefix of the metadata block.
pub const HEADER_FIELDS_SIZE: usize = 16;

// Byte ranges of the defined fields, in the order the FOTA manager and the
// bootloader expect them.
pub const HEADER_VERSION: Range<usize> = 0..4;
pub const HEADER_TIMESTAMP: Range<usize> = 4..8;
pub const HEADER_CHECKSUM: Range<usize> = 8..12;
pub const HEADER_CODE_LENGTH: Range<usize> = 12..16;

/// Image signature and version, packed into the first header word as
/// `(signature << 16) | (major << 8) | minor`.
///
/// The field types enforce the 16/8/8-bit ranges; callers truncate before
/// constructing one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VersionTag {
    pub signature: u16,
    pub major: u8,
    pub minor: u8,
}

impl VersionTag {
    pub fn new(signature: u16, major: u8, minor: u8) -> Self {
        VersionTag {
            signature,
            major,
            minor,
        }
    }

    pub fn to_word(self) -> u32 {
        (u32::from(self.signature) << 16) | (u32::from(self.major) << 8) | u32::from(self.minor)
    }

    pub fn from_word(word: u32) -> Self {
        VersionTag {
            signature: (word >> 16) as u16,
            major: (word >> 8) as u8,
            minor: word as u8,
        }
    }
}

/// The defined field prefix of the metadata block.
///
/// Packs to exactly [`HEADER_FIELDS_SIZE`] bytes; the composer copies the
/// packed bytes into the front of a zeroed [`METADATA_SIZE`] buffer.
#[derive(Clone, Debug, PartialEq, Eq, PackedStruct)]
#[packed_struct(size_bytes = "16", bit_numbering = "msb0", endian = "lsb")]
pub struct MetadataHeader {
    /// Packed [`VersionTag`] word.
    #[packed_field(bytes = "0..=3")]
    pub version: u32,
    /// Unix seconds at composition time.
    #[packed_field(bytes = "4..=7")]
    pub timestamp: u32,
    /// CRC of the code section, as the device CRC engine computes it.
    #[packed_field(bytes = "8..=11")]
    pub checksum: u32,
    /// Byte length of the code section that follows the metadata block.
    #[packed_field(bytes = "12..=15")]
    pub code_length: u32,
}

impl MetadataHeader {
    pub fn version_tag(&self) -> VersionTag {
        VersionTag::from_word(self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_word_packing() {
        let tag = VersionTag::new(0xABCD, 2, 0);
        assert_eq!(tag.to_word(), 0xABCD_0200);
        assert_eq!(VersionTag::from_word(0xABCD_0200), tag);
    }

    #[test]
    fn version_word_roundtrip_extremes() {
        for tag in [
            VersionTag::new(0, 0, 0),
            VersionTag::new(0xFFFF, 0xFF, 0xFF),
            VersionTag::new(0x1234, 0, 0xFF),
        ] {
            assert_eq!(VersionTag::from_word(tag.to_word()), tag);
        }
    }

    #[test]
    fn header_packs_little_endian_in_field_order() {
        let header = MetadataHeader {
            version: 0xABCD_0200,
            timestamp: 0x6543_2100,
            checksum: 0xCBF4_3926,
            code_length: 0x0002_8000,
        };
        let packed = header.pack().unwrap();
        assert_eq!(
            packed,
            [
                0x00, 0x02, 0xCD, 0xAB, // version
                0x00, 0x21, 0x43, 0x65, // timestamp
                0x26, 0x39, 0xF4, 0xCB, // checksum
                0x00, 0x80, 0x02, 0x00, // code length
            ]
        );
        assert_eq!(MetadataHeader::unpack(&packed).unwrap(), header);
    }
}
