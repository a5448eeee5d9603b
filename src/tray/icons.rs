//! Icon generation for the system tray
//!
//! Draws a small rounded gamepad silhouette instead of shipping an image file.

use image::{ImageBuffer, Rgba};

pub const ICON_SIZE: u32 = 32;

const BODY: Rgba<u8> = Rgba([230, 230, 235, 255]);
const BUTTON: Rgba<u8> = Rgba([40, 40, 48, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Generate the tray icon
pub fn generate_icon() -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let size = ICON_SIZE as f32;
    let mut img = ImageBuffer::new(ICON_SIZE, ICON_SIZE);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        *pixel = if in_body(px, py, size) {
            if in_circle(px, py, size * 0.30, size * 0.50, size * 0.08)
                || in_circle(px, py, size * 0.70, size * 0.50, size * 0.08)
            {
                BUTTON
            } else {
                BODY
            }
        } else {
            CLEAR
        };
    }

    img
}

/// Body: a bar between two grips
fn in_body(x: f32, y: f32, size: f32) -> bool {
    let bar = x >= size * 0.25 && x <= size * 0.75 && y >= size * 0.30 && y <= size * 0.70;
    bar || in_circle(x, y, size * 0.28, size * 0.52, size * 0.22)
        || in_circle(x, y, size * 0.72, size * 0.52, size * 0.22)
}

fn in_circle(x: f32, y: f32, cx: f32, cy: f32, r: f32) -> bool {
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

/// Generate icon and return as RGBA bytes for tray-icon
pub fn generate_icon_bytes() -> Vec<u8> {
    generate_icon().into_raw()
}
