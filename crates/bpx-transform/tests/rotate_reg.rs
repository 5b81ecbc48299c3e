//! Orthogonal rotation regression test
//!
//! Rotates and flips images of several formats and shapes, checking that
//! the quarter-turn compositions agree and that borrowed storage rotates
//! in place.

use bpx_core::{Color, ColorRamp, Image, PixelFormat, generate_gradient_linear_2d};
use bpx_io::ImageFormat;
use bpx_test::RegParams;
use bpx_transform::{flip_horizontal, flip_vertical, rotate_90, rotate_180, rotate_orth};

fn sample(w: u32, h: u32, format: PixelFormat) -> Image<'static> {
    let mut img = Image::new(w, h, Color::BLACK, format).unwrap();
    img.map(|x, y, _| Color::new((x * 37) as u8, (y * 53) as u8, (x * y) as u8, 255));
    img
}

#[test]
fn rotate_reg() {
    let mut rp = RegParams::new("rotate");

    let formats = [
        PixelFormat::LU8,
        PixelFormat::Rgba5551,
        PixelFormat::RgbF16,
        PixelFormat::BgraF32,
    ];
    for format in formats {
        for (w, h) in [(6, 6), (7, 4), (3, 9)] {
            test_orth_rotation(&mut rp, &sample(w, h, format));
        }
    }

    // --- Flips ---
    let pixs = sample(5, 4, PixelFormat::RgbaU8);
    let mut flipped = pixs.copy().unwrap();
    flip_horizontal(&mut flipped);
    flip_vertical(&mut flipped);
    let mut turned = pixs.copy().unwrap();
    rotate_180(&mut turned);
    rp.compare_images(&turned, &flipped);

    let mut twice = pixs.copy().unwrap();
    flip_horizontal(&mut twice);
    flip_horizontal(&mut twice);
    rp.compare_images(&pixs, &twice);

    // --- Borrowed storage ---
    let mut buf = sample(4, 2, PixelFormat::RgbU8).into_vec().unwrap();
    {
        let mut borrowed = Image::from_borrowed(&mut buf, 4, 2, PixelFormat::RgbU8).unwrap();
        rotate_90(&mut borrowed, false).unwrap();
        rp.compare_values(2.0, borrowed.width() as f64, 0.0);
        rp.compare_values(4.0, borrowed.height() as f64, 0.0);
    }
    let mut expected = sample(4, 2, PixelFormat::RgbU8);
    rotate_90(&mut expected, false).unwrap();
    rp.compare_strings(expected.data(), &buf);

    // --- Written output ---
    let ramp = ColorRamp::new(Color::RED, Color::BLUE);
    let mut img =
        generate_gradient_linear_2d(48, 32, &ramp, (0, 0), (47, 0), PixelFormat::RgbU8).unwrap();
    rotate_90(&mut img, true).unwrap();
    rp.write_image_and_check(&img, ImageFormat::Png).unwrap();

    assert!(rp.cleanup(), "rotate regression test failed");
}

fn test_orth_rotation(rp: &mut RegParams, pixs: &Image<'_>) {
    let (w, h) = pixs.dimensions();
    eprintln!("Testing {} orthogonal rotation: {}x{}", pixs.format().name(), w, h);

    // --- rotate_orth(0) = identity ---
    let mut r0 = pixs.copy().unwrap();
    rotate_orth(&mut r0, 0).unwrap();
    rp.compare_strings(pixs.data(), r0.data());

    // --- rotate_orth(1) = 90 degrees clockwise ---
    let mut r1 = pixs.copy().unwrap();
    rotate_orth(&mut r1, 1).unwrap();
    rp.compare_values(h as f64, r1.width() as f64, 0.0);
    rp.compare_values(w as f64, r1.height() as f64, 0.0);
    // old top-left lands in the top-right corner
    rp.compare_strings(pixs.pixel_bytes(0), r1.pixel_bytes(r1.width() as usize - 1));

    // --- rotate_orth(2) = two clockwise turns ---
    let mut r2 = pixs.copy().unwrap();
    rotate_orth(&mut r2, 2).unwrap();
    let mut r11 = r1.copy().unwrap();
    rotate_90(&mut r11, true).unwrap();
    rp.compare_strings(r2.data(), r11.data());

    // --- rotate_orth(3) = 90 degrees counterclockwise ---
    let mut r3 = pixs.copy().unwrap();
    rotate_orth(&mut r3, 3).unwrap();
    let mut ccw = pixs.copy().unwrap();
    rotate_90(&mut ccw, false).unwrap();
    rp.compare_strings(r3.data(), ccw.data());
    rp.compare_values(h as f64, r3.width() as f64, 0.0);

    // --- 4 quarter turns = identity ---
    rotate_orth(&mut r3, 1).unwrap();
    rp.compare_strings(pixs.data(), r3.data());
    rp.compare_values(w as f64, r3.width() as f64, 0.0);
}
