//! Canvas resizing
//!
//! Changes the image size without scaling: the old pixels are copied into
//! a new buffer at an anchor-dependent offset and the uncovered area gets
//! a background color. Pixels that fall outside a smaller canvas are
//! dropped.

use crate::error::TransformResult;
use bpx_core::{Color, Image};

/// Where the old image is placed on the new canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasAnchor {
    /// Old top-left corner stays at (0, 0)
    #[default]
    TopLeft,
    /// Old image is centered; odd differences round toward the top-left
    Center,
}

impl CanvasAnchor {
    fn offset(self, old: u32, new: u32) -> i64 {
        match self {
            CanvasAnchor::TopLeft => 0,
            CanvasAnchor::Center => (new as i64 - old as i64) / 2,
        }
    }
}

/// Copy `image` onto a new `width` x `height` canvas of the same format.
///
/// # Errors
///
/// Returns a core error if the new dimensions are zero or the buffer
/// cannot be allocated. The source is never modified.
pub fn resize_canvas(
    image: &Image<'_>,
    width: u32,
    height: u32,
    anchor: CanvasAnchor,
    background: Color,
) -> TransformResult<Image<'static>> {
    let mut canvas = Image::new(width, height, background, image.format())?;

    let ox = anchor.offset(image.width(), width);
    let oy = anchor.offset(image.height(), height);

    // Source columns that land on the canvas.
    let sx0 = (-ox).max(0);
    let sx1 = (width as i64 - ox).min(image.width() as i64);
    if sx0 >= sx1 {
        return Ok(canvas);
    }

    let bpp = image.format().bytes_per_pixel();
    let len = (sx1 - sx0) as usize * bpp;
    let src_start = sx0 as usize * bpp;
    let dst_start = (sx0 + ox) as usize * bpp;

    for sy in 0..image.height() as i64 {
        let dy = sy + oy;
        if dy < 0 || dy >= height as i64 {
            continue;
        }
        let src = &image.row(sy as u32)[src_start..src_start + len];
        canvas.row_mut(dy as u32)[dst_start..dst_start + len].copy_from_slice(src);
    }

    log::trace!(
        "resize_canvas: {}x{} -> {}x{} at ({}, {})",
        image.width(),
        image.height(),
        width,
        height,
        ox,
        oy
    );
    Ok(canvas)
}
