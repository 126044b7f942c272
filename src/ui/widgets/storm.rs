#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

mod flash;
mod fog;
mod rain;
mod reflection;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::{
    domain::{CELL_HEIGHT_PX, CELL_WIDTH_PX, Point, Viewport},
    scene::WeatherScene,
    ui::{
        color::{Rgb, blend, rgb, to_color},
        theme::BACKDROP,
    },
};

/// The animated backdrop. Layers are painted back to front and each tint
/// composites over everything beneath it, glyphs included.
pub struct StormBackdrop<'a> {
    pub scene: &'a WeatherScene,
}

impl Widget for StormBackdrop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut raster = Raster::new(area);
        let flash = self.scene.flash.current();

        reflection::paint(&mut raster, &self.scene.reflection);
        fog::paint(&mut raster, &self.scene.fog, &flash);
        rain::paint(&mut raster, &self.scene.rain);
        flash::paint(&mut raster, &flash);

        raster.flush(buf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Stroke {
    pub glyph: char,
    pub color: Rgb,
    pub alpha: f32,
}

/// One background color and at most one glyph per terminal cell, addressed in
/// the scene's virtual pixels.
#[derive(Debug, Clone)]
pub(crate) struct Raster {
    area: Rect,
    bg: Vec<Rgb>,
    strokes: Vec<Option<Stroke>>,
}

impl Raster {
    pub fn new(area: Rect) -> Self {
        let len = usize::from(area.width) * usize::from(area.height);
        let base = rgb(BACKDROP.0, BACKDROP.1, BACKDROP.2);
        Self {
            area,
            bg: vec![base; len],
            strokes: vec![None; len],
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_cells(self.area.width, self.area.height)
    }

    pub fn columns(&self) -> i32 {
        i32::from(self.area.width)
    }

    pub fn rows(&self) -> i32 {
        i32::from(self.area.height)
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        if column < 0 || row < 0 || column >= self.columns() || row >= self.rows() {
            return None;
        }
        Some(row as usize * usize::from(self.area.width) + column as usize)
    }

    /// Cell containing a virtual-pixel position, if it is on screen.
    pub fn cell_at(&self, point: Point) -> Option<(i32, i32)> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let column = (point.x / CELL_WIDTH_PX).floor() as i32;
        let row = (point.y / CELL_HEIGHT_PX).floor() as i32;
        self.index(column, row).map(|_| (column, row))
    }

    pub fn center(column: i32, row: i32) -> Point {
        Point::new(
            (column as f32 + 0.5) * CELL_WIDTH_PX,
            (row as f32 + 0.5) * CELL_HEIGHT_PX,
        )
    }

    #[cfg(test)]
    pub fn background(&self, column: i32, row: i32) -> Option<Rgb> {
        self.index(column, row).map(|index| self.bg[index])
    }

    #[cfg(test)]
    pub fn stroke(&self, column: i32, row: i32) -> Option<Stroke> {
        self.index(column, row).and_then(|index| self.strokes[index])
    }

    /// Composites a translucent fill over the cell.
    pub fn tint(&mut self, column: i32, row: i32, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let Some(index) = self.index(column, row) else {
            return;
        };
        self.bg[index] = blend(self.bg[index], color, alpha);
        if let Some(stroke) = self.strokes[index].as_mut() {
            stroke.color = blend(stroke.color, color, alpha);
        }
    }

    /// Blends the glyph already in the cell towards `color`; the background
    /// is untouched.
    pub fn overlay_stroke(&mut self, column: i32, row: i32, color: Rgb, alpha: f32) {
        let Some(index) = self.index(column, row) else {
            return;
        };
        if let Some(stroke) = self.strokes[index].as_mut() {
            stroke.color = blend(stroke.color, color, alpha);
        }
    }

    pub fn tint_all(&mut self, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        for bg in &mut self.bg {
            *bg = blend(*bg, color, alpha);
        }
        for stroke in self.strokes.iter_mut().flatten() {
            stroke.color = blend(stroke.color, color, alpha);
        }
    }

    /// Puts a glyph in the cell unless a stronger one is already there.
    pub fn stamp(&mut self, column: i32, row: i32, glyph: char, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let Some(index) = self.index(column, row) else {
            return;
        };
        let slot = &mut self.strokes[index];
        if slot.is_none_or(|existing| alpha >= existing.alpha) {
            *slot = Some(Stroke {
                glyph,
                color,
                alpha: alpha.min(1.0),
            });
        }
    }

    /// Visits every cell a segment passes through, once each, from `from`
    /// towards `to`.
    pub fn trace(&self, from: Point, to: Point, mut visit: impl FnMut(i32, i32)) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let span = dx.abs().max(dy.abs());
        if !span.is_finite() {
            return;
        }
        let samples = (span / (CELL_WIDTH_PX * 0.5)).ceil().max(1.0) as usize;
        let mut last = None;
        for step in 0..=samples {
            let t = step as f32 / samples as f32;
            let point = Point::new(from.x + dx * t, from.y + dy * t);
            let Some(cell) = self.cell_at(point) else {
                continue;
            };
            if last != Some(cell) {
                visit(cell.0, cell.1);
                last = Some(cell);
            }
        }
    }

    pub fn flush(self, buf: &mut Buffer) {
        for row in 0..self.area.height {
            for column in 0..self.area.width {
                let index = usize::from(row) * usize::from(self.area.width) + usize::from(column);
                let bg = self.bg[index];
                let Some(cell) = buf.cell_mut((self.area.x + column, self.area.y + row)) else {
                    continue;
                };
                match self.strokes[index] {
                    Some(stroke) => {
                        let fg = blend(bg, stroke.color, stroke.alpha);
                        cell.set_char(stroke.glyph)
                            .set_fg(to_color(fg))
                            .set_bg(to_color(bg));
                    }
                    None => {
                        cell.set_char(' ').set_bg(to_color(bg));
                    }
                }
            }
        }
    }
}

/// Box-drawing glyph following a segment's direction on a grid of
/// twice-as-tall-as-wide cells.
pub(crate) fn stroke_glyph(from: Point, to: Point, heavy: bool) -> char {
    let dx = (to.x - from.x) / CELL_WIDTH_PX;
    let dy = (to.y - from.y) / CELL_HEIGHT_PX;
    if dx.abs() < dy.abs() * 0.4 {
        if heavy { '┃' } else { '│' }
    } else if dy.abs() < dx.abs() * 0.4 {
        if heavy { '━' } else { '─' }
    } else if dx * dy > 0.0 {
        '╲'
    } else {
        '╱'
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn cell_lookup_uses_eight_by_sixteen_pixels() {
        let raster = Raster::new(Rect::new(0, 0, 10, 5));
        assert_eq!(raster.cell_at(Point::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(raster.cell_at(Point::new(15.9, 16.0)), Some((1, 1)));
        assert_eq!(raster.cell_at(Point::new(80.0, 10.0)), None);
        assert_eq!(raster.cell_at(Point::new(-1.0, 10.0)), None);
    }

    #[test]
    fn trace_visits_each_cell_once() {
        let raster = Raster::new(Rect::new(0, 0, 10, 10));
        let mut cells = Vec::new();
        raster.trace(Point::new(4.0, 0.0), Point::new(4.0, 63.0), |c, r| {
            cells.push((c, r));
        });
        assert_eq!(cells, [(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn weaker_stamp_does_not_replace_stronger_one() {
        let mut raster = Raster::new(Rect::new(0, 0, 2, 2));
        raster.stamp(0, 0, '│', (255.0, 255.0, 255.0), 0.8);
        raster.stamp(0, 0, '.', (100.0, 100.0, 100.0), 0.1);
        assert_eq!(raster.stroke(0, 0).map(|s| s.glyph), Some('│'));
        raster.stamp(0, 0, '╱', (100.0, 100.0, 100.0), 0.9);
        assert_eq!(raster.stroke(0, 0).map(|s| s.glyph), Some('╱'));
    }

    #[test]
    fn glyph_follows_direction() {
        let origin = Point::new(0.0, 0.0);
        assert_eq!(stroke_glyph(origin, Point::new(1.0, 30.0), false), '│');
        assert_eq!(stroke_glyph(origin, Point::new(1.0, 30.0), true), '┃');
        assert_eq!(stroke_glyph(origin, Point::new(30.0, 1.0), false), '─');
        assert_eq!(stroke_glyph(origin, Point::new(16.0, 32.0), false), '╲');
        assert_eq!(stroke_glyph(origin, Point::new(-16.0, 32.0), false), '╱');
    }

    #[test]
    fn flush_writes_backdrop_into_empty_cells() {
        let raster = Raster::new(Rect::new(0, 0, 3, 2));
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 2));
        raster.flush(&mut buf);
        let cell = &buf[(2, 1)];
        assert_eq!(cell.bg, Color::Rgb(0x14, 0x14, 0x14));
        assert_eq!(cell.symbol(), " ");
    }
}
