//! Shared helpers for building real image fixtures in temp directories.

use image::{Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Minimal EXIF APP1 segment: a little-endian TIFF block holding a
/// single Orientation field. Spliced in directly after the JPEG SOI
/// marker, where metadata readers expect it.
const EXIF_APP1: [u8; 36] = [
    0xFF, 0xE1, // APP1 marker
    0x00, 0x22, // segment length (34 bytes incl. this field)
    b'E', b'x', b'i', b'f', 0x00, 0x00, // EXIF identifier
    0x49, 0x49, 0x2A, 0x00, // TIFF header, little endian
    0x08, 0x00, 0x00, 0x00, // offset of IFD0
    0x01, 0x00, // one IFD entry
    0x12, 0x01, // tag 0x0112 (Orientation)
    0x03, 0x00, // type SHORT
    0x01, 0x00, 0x00, 0x00, // one value
    0x01, 0x00, 0x00, 0x00, // value 1 (upright)
    0x00, 0x00, 0x00, 0x00, // no further IFDs
];

/// Deterministic gradient so files with equal (w, h, tint) have equal
/// bytes and any other combination differs
fn test_pixels(width: u32, height: u32, tint: u8) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x as u8).wrapping_add(tint),
            y as u8,
            ((x + y) / 2) as u8,
        ])
    })
}

/// Write a JPEG without any embedded metadata
pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32, tint: u8) -> PathBuf {
    let path = dir.join(name);
    let bytes = encode_jpeg(width, height, tint);
    fs::write(&path, bytes).unwrap();
    path
}

/// Write a JPEG carrying a minimal EXIF segment
pub fn write_jpeg_with_exif(dir: &Path, name: &str, width: u32, height: u32, tint: u8) -> PathBuf {
    let path = dir.join(name);
    let plain = encode_jpeg(width, height, tint);

    // SOI, then the APP1 segment, then the rest of the stream
    let mut bytes = Vec::with_capacity(plain.len() + EXIF_APP1.len());
    bytes.extend_from_slice(&plain[..2]);
    bytes.extend_from_slice(&EXIF_APP1);
    bytes.extend_from_slice(&plain[2..]);

    fs::write(&path, bytes).unwrap();
    path
}

/// Write a PNG without any embedded metadata
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, tint: u8) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = Vec::new();
    test_pixels(width, height, tint)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    fs::write(&path, bytes).unwrap();
    path
}

/// Write a zero-byte file
pub fn write_empty_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"").unwrap();
    path
}

fn encode_jpeg(width: u32, height: u32, tint: u8) -> Vec<u8> {
    let mut bytes = Vec::new();
    test_pixels(width, height, tint)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .unwrap();
    bytes
}
