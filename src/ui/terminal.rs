#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::{
    domain::visual::Rgb,
    ui::{
        color::{ColorCapability, terminal_color},
        raster::Surface,
    },
};

/// Raster pixels per half-block pixel along each axis.
pub const RASTER_SCALE: usize = 6;

const UPPER_HALF_BLOCK: &str = "▀";

/// Raster size backing a `cols` x `rows` cell area: every cell holds two
/// square half-block pixels stacked vertically.
#[must_use]
pub fn raster_size_for(cols: u16, rows: u16) -> (usize, usize) {
    (
        usize::from(cols) * RASTER_SCALE,
        usize::from(rows) * 2 * RASTER_SCALE,
    )
}

/// Presents a raster surface as half-block cells: the glyph's foreground is the
/// upper pixel, the background the lower one.
pub struct SurfaceView<'a> {
    pub surface: &'a Surface,
    pub capability: ColorCapability,
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = (self.surface.width(), self.surface.height());
        if w == 0 || h == 0 || area.is_empty() {
            return;
        }
        let rows = usize::from(area.height) * 2;
        let cols = usize::from(area.width);
        for cy in 0..area.height {
            let upper_row = usize::from(cy) * 2;
            let top_span = block_span(upper_row, rows, h);
            let bottom_span = block_span(upper_row + 1, rows, h);
            for cx in 0..area.width {
                let col_span = block_span(usize::from(cx), cols, w);
                let upper = average(self.surface, col_span, top_span);
                let lower = average(self.surface, col_span, bottom_span);
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_symbol(UPPER_HALF_BLOCK)
                        .set_fg(terminal_color(upper, self.capability))
                        .set_bg(terminal_color(lower, self.capability));
                }
            }
        }
    }
}

/// Raster index range covered by output pixel `index` of `count`.
fn block_span(index: usize, count: usize, extent: usize) -> (usize, usize) {
    let start = index * extent / count;
    let end = ((index + 1) * extent / count).max(start + 1).min(extent);
    (start.min(extent.saturating_sub(1)), end)
}

fn average(surface: &Surface, (x0, x1): (usize, usize), (y0, y1): (usize, usize)) -> Rgb {
    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(px) = surface.pixel(x, y) {
                r += u32::from(px.r);
                g += u32::from(px.g);
                b += u32::from(px.b);
                n += 1;
            }
        }
    }
    if n == 0 {
        return Rgb::BLACK;
    }
    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}
