//! Pixel codec regression test
//!
//! Round-trips a palette of colors through every pixel format and checks
//! the error against the precision of the format's channel encoding.

use bpx_core::codec::{self, ALPHA_BIT_THRESHOLD};
use bpx_core::{ChannelEncoding, Color, Image, PixelFormat};
use bpx_test::RegParams;

const PALETTE: [Color; 7] = [
    Color::BLACK,
    Color::WHITE,
    Color::BLANK,
    Color::new(12, 200, 77, 128),
    Color::new(128, 64, 32, 0),
    Color::new(250, 5, 130, 51),
    Color::new(1, 254, 127, 50),
];

/// Largest per-channel error a round trip may introduce.
fn tolerance(encoding: ChannelEncoding) -> f64 {
    match encoding {
        ChannelEncoding::U8 | ChannelEncoding::F16 | ChannelEncoding::F32 => 0.0,
        ChannelEncoding::Packed565 | ChannelEncoding::Packed5551 => 255.0 / 31.0 + 1.0,
        ChannelEncoding::Packed4444 => 255.0 / 15.0 + 1.0,
    }
}

/// Gray version of `c` for luminance formats, which only keep gray exactly.
fn input_for(format: PixelFormat, c: Color) -> Color {
    if format.channel_count() <= 2 {
        Color::new(c.g, c.g, c.g, c.a)
    } else {
        c
    }
}

#[test]
fn codec_reg() {
    let mut rp = RegParams::new("codec");

    // --- Test 1: every format round-trips within its precision ---
    for format in PixelFormat::ALL {
        let tol = tolerance(format.encoding());
        for c in PALETTE {
            let input = input_for(format, c);
            let bytes = codec::encode_pixel(format, input);
            let out = codec::decode(format, &bytes[..format.bytes_per_pixel()]);

            rp.compare_values(input.r as f64, out.r as f64, tol);
            rp.compare_values(input.g as f64, out.g as f64, tol);
            rp.compare_values(input.b as f64, out.b as f64, tol);

            let expected_alpha = match format.encoding() {
                _ if !format.has_alpha() => 255.0,
                ChannelEncoding::Packed5551 => {
                    if input.a > ALPHA_BIT_THRESHOLD { 255.0 } else { 0.0 }
                }
                _ => input.a as f64,
            };
            rp.compare_values(expected_alpha, out.a as f64, tol);
        }
    }

    // --- Test 2: BGR layouts store blue first ---
    let rgb = codec::encode_pixel(PixelFormat::RgbU8, Color::new(1, 2, 3, 255));
    let bgr = codec::encode_pixel(PixelFormat::BgrU8, Color::new(1, 2, 3, 255));
    rp.compare_strings(&rgb[..3], &[1, 2, 3]);
    rp.compare_strings(&bgr[..3], &[3, 2, 1]);

    // --- Test 3: image storage agrees with the codec ---
    for format in PixelFormat::ALL {
        let c = input_for(format, Color::new(40, 80, 160, 255));
        let img = Image::new(2, 2, c, format).unwrap();
        let bpp = format.bytes_per_pixel();
        rp.compare_values((4 * bpp) as f64, img.data().len() as f64, 0.0);
        rp.compare_strings(
            &img.data()[3 * bpp..],
            &codec::encode_pixel(format, c)[..bpp],
        );
    }

    // --- Test 4: half-float conversion stays finite ---
    for v in [0.0f32, 1.0, 65504.0, 1.0e-5, 6.0e-8, -2.5] {
        let back = codec::f16_bits_to_f32(codec::f32_to_f16_bits(v));
        rp.compare_values(1.0, if back.is_nan() { 0.0 } else { 1.0 }, 0.0);
    }
    rp.compare_values(
        0.5,
        codec::f16_bits_to_f32(codec::f32_to_f16_bits(0.5)) as f64,
        0.0,
    );

    assert!(rp.cleanup());
}
