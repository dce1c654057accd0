#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, pixels: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 54];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(54 + pixels.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out[38..42].copy_from_slice(&2835u32.to_le_bytes());
    out[42..46].copy_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit (3 bytes + 1 padding)
    fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp(1, 1, 24, &[0x00, 0x00, 0xff, 0x00])).unwrap();

    // 2x2 32-bit BGRA
    let bgra = [0, 255, 255, 255, 0, 0, 255, 255, 255, 255, 0, 122, 255, 255, 255, 122];
    fs::write(format!("{dir}/bmp32_2x2.bmp"), bmp(2, 2, 32, &bgra)).unwrap();

    // 1x2 top-down 24-bit
    fs::write(format!("{dir}/bmp24_topdown.bmp"), bmp(1, -2, 24, &[1, 2, 3, 0, 4, 5, 6, 0])).unwrap();

    // Zero-area
    fs::write(format!("{dir}/bmp24_0x0.bmp"), bmp(0, 0, 24, &[])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bmp8.bmp"), bmp(1, 1, 8, &[0, 0, 0, 0])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
