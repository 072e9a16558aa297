//! Frame annotation.
//!
//! Pure rendering of one frame: every raw detection gets its box and a label
//! tag, the safe zone is drawn as a dashed guide, and a semi-opaque timestamp
//! badge sits in the top-right corner. The only side effect is on the passed
//! pixel buffer.

mod font;

use chrono::{DateTime, Local};
use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

use crate::{
    models::{Detection, Zone},
    status::format_clock,
};

pub use font::{draw_text, text_height, text_width};

/// The class drawn in the primary color.
const PRIMARY_CLASS: &str = "person";

/// Box and tag color for the primary target class.
const PRIMARY_COLOR: Rgb<u8> = Rgb([0xff, 0x41, 0x36]);

/// Box and tag color for every other class.
const OTHER_COLOR: Rgb<u8> = Rgb([0x2e, 0xcc, 0x40]);

const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const BLACK: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);

/// Dash length of the zone guide, in pixels on then off.
const ZONE_DASH: u32 = 6;

const TEXT_SCALE: u32 = 2;
const TAG_HEIGHT: u32 = 20;

/// Annotates one frame in place.
pub fn annotate(
    canvas: &mut RgbImage,
    detections: &[Detection],
    zone: &Zone,
    timestamp: DateTime<Local>,
) {
    for detection in detections {
        draw_detection(canvas, detection);
    }
    draw_zone_guide(canvas, zone);
    draw_timestamp_badge(canvas, &format_clock(timestamp));
}

fn color_for(label: &str) -> Rgb<u8> {
    if label == PRIMARY_CLASS {
        PRIMARY_COLOR
    } else {
        OTHER_COLOR
    }
}

fn draw_detection(canvas: &mut RgbImage, detection: &Detection) {
    let color = color_for(&detection.label);
    let bbox = &detection.bbox;
    let x = bbox.x.round() as i32;
    let y = bbox.y.round() as i32;
    let width = bbox.width.round().max(1.0) as u32;
    let height = bbox.height.round().max(1.0) as u32;

    // Two nested rectangles give a 2px border.
    draw_hollow_rect_mut(canvas, Rect::at(x, y).of_size(width, height), color);
    if width > 2 && height > 2 {
        draw_hollow_rect_mut(canvas, Rect::at(x + 1, y + 1).of_size(width - 2, height - 2), color);
    }

    let tag = format!("{} {:.0}%", detection.label, detection.confidence * 100.0);
    let tag_y = (y - TAG_HEIGHT as i32).max(0);
    let tag_width = text_width(&tag, TEXT_SCALE) + 8;
    fill_blend_rect(canvas, x, tag_y, tag_width, TAG_HEIGHT, color, 0.7);
    draw_text(canvas, &tag, x + 4, tag_y + 3, TEXT_SCALE, WHITE);
}

/// Draws the zone outline as a dashed half-opacity guide.
fn draw_zone_guide(canvas: &mut RgbImage, zone: &Zone) {
    let x0 = zone.x.round() as i32;
    let y0 = zone.y.round() as i32;
    let x1 = (zone.x + zone.width).round() as i32;
    let y1 = (zone.y + zone.height).round() as i32;

    let mut step = 0u32;
    for x in x0..=x1 {
        if (step / ZONE_DASH) % 2 == 0 {
            blend_pixel(canvas, x, y0, WHITE, 0.5);
            blend_pixel(canvas, x, y1, WHITE, 0.5);
        }
        step += 1;
    }
    step = 0;
    for y in y0..=y1 {
        if (step / ZONE_DASH) % 2 == 0 {
            blend_pixel(canvas, x0, y, WHITE, 0.5);
            blend_pixel(canvas, x1, y, WHITE, 0.5);
        }
        step += 1;
    }
}

/// Draws the timestamp badge anchored to the top-right corner.
fn draw_timestamp_badge(canvas: &mut RgbImage, stamp: &str) {
    let pad = 6u32;
    let badge_width = text_width(stamp, TEXT_SCALE) + pad * 2;
    let badge_height = 22u32;
    let x = canvas.width() as i32 - badge_width as i32 - 10;
    let y = 10i32;
    fill_blend_rect(canvas, x, y, badge_width, badge_height, BLACK, 0.6);
    draw_text(canvas, stamp, x + pad as i32, y + 4, TEXT_SCALE, WHITE);
}

/// Blends `color` over the pixel at `(x, y)` with the given opacity. Out of
/// bounds coordinates are skipped.
fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, alpha: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let existing = canvas.get_pixel(x as u32, y as u32);
    let mixed = Rgb([
        blend_channel(existing[0], color[0], alpha),
        blend_channel(existing[1], color[1], alpha),
        blend_channel(existing[2], color[2], alpha),
    ]);
    canvas.put_pixel(x as u32, y as u32, mixed);
}

fn blend_channel(under: u8, over: u8, alpha: f32) -> u8 {
    (under as f32 * (1.0 - alpha) + over as f32 * alpha).round() as u8
}

fn fill_blend_rect(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgb<u8>,
    alpha: f32,
) {
    for dy in 0..height as i32 {
        for dx in 0..width as i32 {
            blend_pixel(canvas, x + dx, y + dy, color, alpha);
        }
    }
}
