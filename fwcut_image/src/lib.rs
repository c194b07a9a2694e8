// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod checksum;
pub mod compose;
pub mod cut;
pub mod verify;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("section {start:#x}..{end:#x} is outside the source file ({len:#x} bytes)")]
    SectionOutOfRange { start: u64, end: u64, len: u64 },

    #[error("could not fit section length in a `u32`")]
    SectionLengthOverflow,

    #[error("image too short for a metadata block: {0} bytes")]
    TruncatedImage(usize),

    #[error("header claims {header} code bytes, image carries {actual}")]
    CodeLengthMismatch { header: u32, actual: usize },

    #[error("checksum mismatch: header {header:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { header: u32, computed: u32 },

    #[error("struct packing error: {0}")]
    PackingError(#[from] packed_struct::PackingError),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
