/*
    MartyPC
    https://github.com/dbalsom/martypc

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    tablegen.rs

    Constant initializers for colour sets and the 1bpp bit expansion table.

*/

/// Constant initializer to expand all possible 8 bit patterns into 8 bytes of 0 or 1,
/// most significant bit first. Used by the 1bpp unpack path.
pub const BIT_EXPAND_TABLE: [[u8; 8]; 256] = {
    let mut table: [[u8; 8]; 256] = [[0; 8]; 256];

    let mut glyph: usize = 0;
    let mut bit: usize;
    loop {
        bit = 0;
        loop {
            table[glyph][bit] = ((glyph >> (7 - bit)) & 0x01) as u8;

            if bit < 7 {
                bit += 1;
            }
            else {
                break;
            }
        }

        if glyph < 255 {
            glyph += 1;
        }
        else {
            break;
        }
    }

    table
};

/// The 16-colour RGBI colour set. Intensity adds 0x55 to every channel. Colour 6 is
/// CGA brown: the monitor halves its green component.
pub const COLOURS16: [(u8, u8, u8); 16] = {
    let mut table = [(0u8, 0u8, 0u8); 16];

    let mut i = 0;
    while i < 16 {
        let bright: u8 = if i & 0x08 != 0 { 0x55 } else { 0x00 };
        let r = (if i & 0x04 != 0 { 0xaa } else { 0x00 }) + bright;
        let mut g = (if i & 0x02 != 0 { 0xaa } else { 0x00 }) + bright;
        let b = (if i & 0x01 != 0 { 0xaa } else { 0x00 }) + bright;
        if i == 6 {
            g = 0x55;
        }
        table[i] = (r, g, b);
        i += 1;
    }

    table
};

/// The 64-colour EGA colour set. Index bits are rgbRGB: the low three bits contribute
/// 0xaa to blue, green and red, the high three contribute 0x55.
pub const COLOURS64: [(u8, u8, u8); 64] = {
    let mut table = [(0u8, 0u8, 0u8); 64];

    let mut i = 0;
    while i < 64 {
        let r = (if i & 0x04 != 0 { 0xaa } else { 0x00 }) + (if i & 0x20 != 0 { 0x55 } else { 0x00 });
        let g = (if i & 0x02 != 0 { 0xaa } else { 0x00 }) + (if i & 0x10 != 0 { 0x55 } else { 0x00 });
        let b = (if i & 0x01 != 0 { 0xaa } else { 0x00 }) + (if i & 0x08 != 0 { 0x55 } else { 0x00 });
        table[i] = (r, g, b);
        i += 1;
    }

    table
};
