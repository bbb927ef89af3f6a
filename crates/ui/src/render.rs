//! Scroll field drawing.
//!
//! A scrolling label shares its row with thumbnails and icons, so a redraw
//! may only touch pixels inside the field's clip rectangle. Two ways to get
//! there:
//!
//! - [`draw_scroll_field`] clears the clip rectangle and draws through a
//!   clipped draw target, so nothing outside the rectangle is written.
//! - [`draw_scroll_field_unclipped`] is for rasterizers that cannot clip: it
//!   draws the shifted text, then repaints only the [`leak_strips`] where the
//!   text spilled past the rectangle.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::Vec;

fn shifted_origin(clip: &Rectangle, offset: u32) -> Point {
    let dx = i32::try_from(offset).unwrap_or(i32::MAX);
    Point::new(clip.top_left.x.saturating_sub(dx), clip.top_left.y)
}

/// Clear `clip` to `background` and draw `text` shifted left by `offset`,
/// writing no pixel outside `clip`.
pub fn draw_scroll_field<D, C>(
    target: &mut D,
    clip: Rectangle,
    text: &str,
    style: MonoTextStyle<'_, C>,
    background: C,
    offset: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    clip.into_styled(PrimitiveStyle::with_fill(background))
        .draw(target)?;
    let mut clipped = target.clipped(&clip);
    Text::with_baseline(text, shifted_origin(&clip, offset), style, Baseline::Top)
        .draw(&mut clipped)?;
    Ok(())
}

/// Regions outside `clip` that a text run of `text_width` pixels, shifted
/// left by `offset`, covers. At most one strip on each side.
pub fn leak_strips(clip: Rectangle, text_width: u32, offset: u32) -> Vec<Rectangle, 2> {
    let mut strips = Vec::new();
    let height = clip.size.height;
    let left = offset.min(text_width);
    if left > 0 {
        let x = shifted_origin(&clip, left).x;
        let _ = strips.push(Rectangle::new(
            Point::new(x, clip.top_left.y),
            Size::new(left, height),
        ));
    }
    let right = text_width
        .saturating_sub(offset)
        .saturating_sub(clip.size.width);
    if right > 0 {
        let dx = i32::try_from(clip.size.width).unwrap_or(i32::MAX);
        let _ = strips.push(Rectangle::new(
            Point::new(clip.top_left.x.saturating_add(dx), clip.top_left.y),
            Size::new(right, height),
        ));
    }
    strips
}

/// Draw without clipping support, then repaint the spill with `background`.
///
/// Only the clip rectangle and the leak strips are written.
pub fn draw_scroll_field_unclipped<D, C>(
    target: &mut D,
    clip: Rectangle,
    text: &str,
    style: MonoTextStyle<'_, C>,
    background: C,
    offset: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    clip.into_styled(PrimitiveStyle::with_fill(background))
        .draw(target)?;
    let origin = shifted_origin(&clip, offset);
    let drawn = Text::with_baseline(text, origin, style, Baseline::Top);
    drawn.draw(target)?;
    let width = drawn.bounding_box().size.width;
    for strip in leak_strips(clip, width, offset) {
        strip
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(target)?;
    }
    Ok(())
}
