//! Rasterizer regression test
//!
//! Covers rectangle fills, line clipping, thick lines at extreme
//! coordinates, circle symmetry and a composed scene written through the
//! PNG codec.

use bpx_core::{BlendMode, Color, ColorRamp, Image, PixelFormat, Rect, clip_line};
use bpx_io::ImageFormat;
use bpx_test::RegParams;
use std::collections::HashSet;

fn lit(img: &Image<'_>, background: Color) -> HashSet<(i32, i32)> {
    let (w, h) = (img.width() as i32, img.height() as i32);
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| img.get(x, y) != background)
        .collect()
}

#[test]
fn draw_reg() {
    let mut rp = RegParams::new("draw");

    // --- Test 1: 2x2 rectangle inside a 4x4 buffer ---
    let mut img = Image::new(4, 4, Color::BLACK, PixelFormat::RgbaU8).unwrap();
    img.rectangle(1, 1, 2, 2, Color::RED, BlendMode::Replace);
    let mut expected = Image::new(4, 4, Color::BLACK, PixelFormat::RgbaU8).unwrap();
    for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
        expected.set(x, y, Color::RED);
    }
    rp.compare_images(&expected, &img);

    // --- Test 2: clipping ---
    let mut img = Image::new(8, 8, Color::BLACK, PixelFormat::RgbU8).unwrap();
    img.line(-10, -3, 20, -3, Color::WHITE, BlendMode::Replace);
    img.line(9, 0, 30, 7, Color::WHITE, BlendMode::Replace);
    rp.compare_values(0.0, lit(&img, Color::BLACK).len() as f64, 0.0);

    img.line(1, 1, 6, 1, Color::WHITE, BlendMode::Replace);
    rp.compare_values(5.0, lit(&img, Color::BLACK).len() as f64, 0.0);

    let clipped = clip_line(-4, 3, 12, 3, Rect::new(0, 0, 8, 8));
    rp.compare_values(1.0, (clipped == Some((0, 3, 7, 3))) as u8 as f64, 0.0);

    let mut img = Image::new(8, 8, Color::BLACK, PixelFormat::RgbU8).unwrap();
    img.line(-5, -5, 20, 12, Color::WHITE, BlendMode::Replace);
    let pts = lit(&img, Color::BLACK);
    rp.compare_values(1.0, (!pts.is_empty()) as u8 as f64, 0.0);
    let in_bounds = pts.iter().all(|&(x, y)| (0..8).contains(&x) && (0..8).contains(&y));
    rp.compare_values(1.0, in_bounds as u8 as f64, 0.0);

    // --- Test 3: circle outline symmetry ---
    for radius in [0, 1, 4, 9] {
        let mut img = Image::new(25, 25, Color::BLACK, PixelFormat::LU8).unwrap();
        img.circle_lines(12, 12, radius, Color::WHITE, BlendMode::Replace);
        let pts = lit(&img, Color::BLACK);
        let symmetric = pts.iter().all(|&(x, y)| {
            let (dx, dy) = (x - 12, y - 12);
            [(-dx, dy), (dx, -dy), (dy, dx), (-dy, -dx)]
                .iter()
                .all(|&(mx, my)| pts.contains(&(12 + mx, 12 + my)))
        });
        rp.compare_values(1.0, symmetric as u8 as f64, 0.0);
    }

    // --- Test 4: thick lines with far-off endpoints ---
    let mut img = Image::new(8, 8, Color::BLACK, PixelFormat::RgbU8).unwrap();
    img.line_thick(-2_000_000_000, 4, 2_000_000_000, 4, 3, Color::WHITE, BlendMode::Replace);
    let pts = lit(&img, Color::BLACK);
    let rows: HashSet<i32> = pts.iter().map(|&(_, y)| y).collect();
    rp.compare_values(1.0, (rows == HashSet::from([3, 4, 5])) as u8 as f64, 0.0);
    rp.compare_values(21.0, pts.len() as f64, 0.0);

    let mut img = Image::new(8, 8, Color::BLACK, PixelFormat::RgbU8).unwrap();
    img.line_thick_map(4, i32::MIN, 4, i32::MAX, 3, |_, _, _| Color::WHITE);
    let cols: HashSet<i32> = lit(&img, Color::BLACK).iter().map(|&(x, _)| x).collect();
    rp.compare_values(1.0, (cols == HashSet::from([3, 4, 5])) as u8 as f64, 0.0);

    let ramp = ColorRamp::new(Color::RED, Color::BLUE);
    let mut img = Image::new(8, 8, Color::BLACK, PixelFormat::RgbU8).unwrap();
    img.line_thick_gradient(
        -2_000_000_000,
        -2_000_000_000,
        2_000_000_000,
        2_000_000_000,
        5,
        &ramp,
        BlendMode::Replace,
    );
    let pts = lit(&img, Color::BLACK);
    rp.compare_values(1.0, (!pts.is_empty()) as u8 as f64, 0.0);

    // --- Test 5: partly off-image thick lines stay in bounds ---
    let mut img = Image::new(8, 8, Color::BLACK, PixelFormat::RgbU8).unwrap();
    img.line_thick(-3, 2, 10, 6, 4, Color::WHITE, BlendMode::Replace);
    img.line_thick(6, -5, 1, 12, 3, Color::WHITE, BlendMode::Replace);
    img.line_thick(0, 0, 7, 0, 9, Color::WHITE, BlendMode::Replace);
    let pts = lit(&img, Color::BLACK);
    rp.compare_values(1.0, (!pts.is_empty()) as u8 as f64, 0.0);
    let in_bounds = pts.iter().all(|&(x, y)| (0..8).contains(&x) && (0..8).contains(&y));
    rp.compare_values(1.0, in_bounds as u8 as f64, 0.0);

    // --- Test 6: composed scene ---
    let mut scene = Image::new(64, 48, Color::DARKBLUE, PixelFormat::RgbaU8).unwrap();
    scene.rectangle_gradient(
        4,
        4,
        59,
        43,
        [Color::RED, Color::GOLD, Color::GREEN, Color::SKYBLUE],
        BlendMode::Replace,
    );
    scene.circle_gradient(32, 24, 14, &ColorRamp::new(Color::WHITE, Color::PURPLE), BlendMode::Replace);
    scene.circle_lines_thick(32, 24, 18, 3, Color::BLACK, BlendMode::Replace);
    scene.line_thick(0, 47, 63, 0, 3, Color::new(255, 255, 255, 128), BlendMode::Alpha);
    scene.rectangle_lines(0, 0, 63, 47, Color::WHITE, BlendMode::Replace);

    let stamp = Image::new(4, 4, Color::MAGENTA, PixelFormat::Bgr565).unwrap();
    scene.draw(Rect::new(2, 2, 8, 8), &stamp, Rect::of(&stamp), BlendMode::Replace);
    rp.compare_values(1.0, (scene.get(5, 5) == Color::MAGENTA) as u8 as f64, 0.0);

    rp.write_image_and_check(&scene, ImageFormat::Png).unwrap();

    assert!(rp.cleanup());
}
