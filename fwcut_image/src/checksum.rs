// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CRC of the code section, bit-identical to the hardware CRC engine the
//! device uses to re-verify an image after an update.
//!
//! This is CRC-32 with the IEEE 802.3 polynomial and reflected input and
//! output, written in the left-shifting form the peripheral implements. The
//! variant is fixed by the four constants below; changing any of them changes
//! which peripheral the output matches.

const POLYNOMIAL: u32 = 0x04C1_1DB7;
const INITIAL_REMAINDER: u32 = 0xFFFF_FFFF;
const FINAL_XOR_VALUE: u32 = 0xFFFF_FFFF;
const WIDTH: u32 = 32;
const TOPBIT: u32 = 1 << (WIDTH - 1);

/// Reverses the low `nbits` bits of `data`.
fn reflect(data: u32, nbits: u32) -> u32 {
    let mut reflection = 0;
    for bit in 0..nbits {
        if data & (1 << bit) != 0 {
            reflection |= 1 << ((nbits - 1) - bit);
        }
    }
    reflection
}

/// Computes the section CRC. Total over every input, the empty one included.
pub fn crc32(data: &[u8]) -> u32 {
    let mut remainder = INITIAL_REMAINDER;
    for &byte in data {
        remainder ^= reflect(u32::from(byte), 8) << (WIDTH - 8);
        for _ in 0..8 {
            remainder = if remainder & TOPBIT != 0 {
                (remainder << 1) ^ POLYNOMIAL
            } else {
                remainder << 1
            };
        }
    }
    reflect(remainder, WIDTH) ^ FINAL_XOR_VALUE
}
