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

    ---------------------------------------------------------------------------

    benches::bytematrix_bench.rs

    Benchmarks for packing and unpacking video memory.

*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marty_vram::{
    bytematrix::{hstack, ByteMatrix},
    framebuffer::SpriteBuilder,
};

pub fn bytematrix_bench(c: &mut Criterion) {
    // One 640x200 1bpp screen of packed pixels
    let packed: Vec<u8> = (0..16000).map(|i| (i * 7) as u8).collect();

    c.bench_function("bytematrix_unpack_1bpp", |b| {
        b.iter(|| ByteMatrix::from_packed(black_box(&packed), 200, 8));
    });

    c.bench_function("bytematrix_unpack_2bpp", |b| {
        b.iter(|| ByteMatrix::from_packed(black_box(&packed), 200, 4));
    });

    c.bench_function("bytematrix_pack_4bpp", |b| {
        let matrix = ByteMatrix::from_packed(&packed, 200, 2).unwrap();

        b.iter(|| black_box(&matrix).packed(2));
    });

    c.bench_function("bytematrix_hstack_glyphs", |b| {
        // 80 8x8 glyphs making up one text row
        let glyphs: Vec<ByteMatrix> = (0..80u8).map(|i| ByteMatrix::filled(8, 8, i)).collect();

        b.iter(|| hstack(black_box(&glyphs)));
    });

    c.bench_function("sprite_pack_planed_4bpp", |b| {
        let sprite = ByteMatrix::from_packed(&packed[..0x800], 64, 2).unwrap();
        let builder = SpriteBuilder::Planed { bits_per_pixel: 4 };

        b.iter(|| builder.pack(black_box(&sprite)));
    });
}

criterion_group!(benches, bytematrix_bench);
criterion_main!(benches);
