use anyhow::Result;
use image::{DynamicImage, ImageBuffer, Rgba};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::deck::COST_BUCKETS;

const BASE_SIZE: f32 = 600.0;
pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;

/// Options controlling histogram chart generation.
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Edge length of the square chart in pixels.
    pub size: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self { size: 600 }
    }
}

struct Palette {
    page_bg: Rgba<u8>,
    plot_bg: Rgba<u8>,
    bar: Rgba<u8>,
    bar_edge: Rgba<u8>,
    grid: Rgba<u8>,
    axis: Rgba<u8>,
    text: Rgba<u8>,
}

fn palette() -> Palette {
    Palette {
        page_bg: rgba(0xfd, 0xfa, 0xf3, 0xff),
        plot_bg: rgba(0xf7, 0xf2, 0xe6, 0xff),
        bar: rgba(0xb5, 0x3a, 0x2e, 0xff),
        bar_edge: rgba(0x6e, 0x22, 0x1b, 0xff),
        grid: rgba(0xd7, 0xc9, 0xa8, 0xff),
        axis: rgba(0x3a, 0x33, 0x28, 0xff),
        text: rgba(0x28, 0x24, 0x1f, 0xff),
    }
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

/// Render the 7-bucket cost histogram as a square bar chart.
///
/// Bars sit flush against each other, the y-axis runs from zero to one above
/// the tallest bucket, and each bucket is labelled `N ENERGY` underneath.
pub fn render_histogram(histogram: &[u32; COST_BUCKETS], options: &ChartOptions) -> Result<DynamicImage> {
    let size = options.size.clamp(300, 2400);
    let scale = size as f32 / BASE_SIZE;
    let palette = palette();

    let mut img = ImageBuffer::from_pixel(size, size, palette.page_bg);

    let left = (84.0 * scale).round();
    let right = size as f32 - (28.0 * scale).round();
    let top = (72.0 * scale).round();
    let bottom = size as f32 - (84.0 * scale).round();
    let plot_w = right - left;
    let plot_h = bottom - top;

    draw_filled_rect_mut(
        &mut img,
        Rect::at(left as i32, top as i32).of_size(plot_w as u32, plot_h as u32),
        palette.plot_bg,
    );

    // Y-axis spans 0..=max+1, matching the original report chart.
    let y_max = histogram.iter().copied().max().unwrap_or(0) + 1;
    let tick_step = tick_step(y_max);

    let glyph_scale = ((1.6 * scale).round() as u32).max(1);
    let glyph_height_px = (GLYPH_HEIGHT as u32 * glyph_scale) as i32;

    let mut tick = 0u32;
    while tick <= y_max {
        let y = bottom - (tick as f32 / y_max as f32) * plot_h;
        if tick > 0 {
            draw_line_segment_mut(&mut img, (left, y), (right, y), palette.grid);
        }
        let label = tick.to_string();
        let label_w = text_width(&label, glyph_scale) as f32;
        draw_text(
            &mut img,
            (left - label_w - 8.0 * scale) as i32,
            (y - glyph_height_px as f32 / 2.0) as i32,
            &label,
            palette.text,
            glyph_scale,
        );
        tick += tick_step;
    }

    // Bars are flush: no lower, upper or category margins.
    let bar_w = plot_w / COST_BUCKETS as f32;
    for (bucket, &count) in histogram.iter().enumerate() {
        let x = left + bucket as f32 * bar_w;
        if count > 0 {
            let h = (count as f32 / y_max as f32) * plot_h;
            let rect = Rect::at(x.round() as i32, (bottom - h).round() as i32)
                .of_size(bar_w.round() as u32, h.round().max(1.0) as u32);
            draw_filled_rect_mut(&mut img, rect, palette.bar);
            draw_hollow_rect_mut(&mut img, rect, palette.bar_edge);
        }

        let label = format!("{bucket} ENERGY");
        let label_w = text_width(&label, glyph_scale) as f32;
        draw_text(
            &mut img,
            (x + (bar_w - label_w) / 2.0) as i32,
            (bottom + 12.0 * scale) as i32,
            &label,
            palette.text,
            glyph_scale,
        );
    }

    draw_line_segment_mut(&mut img, (left, top), (left, bottom), palette.axis);
    draw_line_segment_mut(&mut img, (left, bottom), (right, bottom), palette.axis);

    let title_scale = ((2.4 * scale).round() as u32).max(2);
    let title = "CARD COST DISTRIBUTION";
    let title_w = text_width(title, title_scale) as f32;
    draw_text(
        &mut img,
        ((size as f32 - title_w) / 2.0) as i32,
        (24.0 * scale) as i32,
        title,
        palette.text,
        title_scale,
    );

    let axis_title = "NUMBER OF CARDS PER ENERGY COST";
    let axis_title_w = text_width(axis_title, glyph_scale) as f32;
    draw_text(
        &mut img,
        ((size as f32 - axis_title_w) / 2.0) as i32,
        (size as f32 - 36.0 * scale) as i32,
        axis_title,
        palette.text,
        glyph_scale,
    );

    Ok(DynamicImage::ImageRgba8(img))
}

/// Keep roughly ten gridlines once buckets grow past a unit-tick axis.
fn tick_step(y_max: u32) -> u32 {
    if y_max <= 20 { 1 } else { y_max.div_ceil(10) }
}

fn text_width(text: &str, scale: u32) -> u32 {
    let cols = text.chars().count() as u32 * (GLYPH_WIDTH as u32 + 1);
    cols.saturating_sub(1) * scale
}

fn draw_text(
    image: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    x: i32,
    y: i32,
    text: &str,
    color: Rgba<u8>,
    scale: u32,
) {
    let advance = ((GLYPH_WIDTH + 1) as u32 * scale) as i32;
    for (idx, ch) in text.chars().enumerate() {
        draw_glyph(image, x + idx as i32 * advance, y, ch, color, scale);
    }
}

fn draw_glyph(
    image: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    x: i32,
    y: i32,
    ch: char,
    color: Rgba<u8>,
    scale: u32,
) {
    let pattern = glyph_pattern(ch);
    for (row, bits) in pattern.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + (col as i32 * scale as i32);
                let py = y + (row as i32 * scale as i32);
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}

/// 5x7 patterns for the characters the chart actually uses: digits plus the
/// letters of the axis titles and bucket labels. Anything else renders blank.
#[rustfmt::skip]
fn glyph_pattern(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        _ => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
    }
}
