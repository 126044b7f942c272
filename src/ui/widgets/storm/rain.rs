use super::{Raster, stroke_glyph};
use crate::{
    domain::{
        Point,
        bolt::{BRANCH_OPACITY, ThunderBolt},
    },
    scene::rain::{RainLayer, Splash},
    ui::color::{Rgb, WHITE, rgb, rgba_to_rgb},
};

/// Alpha multiplier for strokes much thinner than a cell.
const HAIRLINE_GAIN: f32 = 2.0;
const PUDDLE_GAIN: f32 = 2.5;
/// White glow strength relative to the bolt's opacity.
const GLOW_SHARE: f32 = 0.7;
/// Bolts at least this wide get the heavy glyphs.
const HEAVY_WIDTH: f32 = 3.5;

pub(super) fn paint(raster: &mut Raster, layer: &RainLayer) {
    let streak = rgb(160, 176, 192);
    for drop in &layer.drops {
        let head = layer.displaced(drop);
        let tail = drop.tail(head);
        let glyph = stroke_glyph(head, tail, false);
        let alpha = drop.opacity * HAIRLINE_GAIN;
        let mut cells = Vec::new();
        raster.trace(head, tail, |column, row| cells.push((column, row)));
        for (column, row) in cells {
            raster.stamp(column, row, glyph, streak, alpha);
        }
    }

    paint_splashes(raster, &layer.landings, rgb(150, 170, 190));
    paint_splashes(raster, &layer.ambient, rgb(150, 150, 150));
    paint_puddles(raster, layer);

    for bolt in &layer.bolts {
        paint_bolt(raster, bolt, bolt.envelope_opacity());
    }
}

fn paint_splashes(raster: &mut Raster, splashes: &[Splash], color: Rgb) {
    for splash in splashes {
        if let Some((column, row)) = raster.cell_at(Point::new(splash.x, splash.y)) {
            let glyph = if splash.radius >= 3.0 { '∘' } else { '.' };
            raster.stamp(column, row, glyph, color, splash.alpha * HAIRLINE_GAIN);
        }
    }
}

/// Each puddle is a flat, breathing ellipse: a tinted fill plus a ripple line
/// along the row holding its center.
fn paint_puddles(raster: &mut Raster, layer: &RainLayer) {
    let water = rgb(150, 170, 190);
    for puddle in &layer.puddles {
        let (rx, ry) = puddle.ripple_radii(layer.time_ms());
        if rx <= 0.0 {
            continue;
        }
        let alpha = puddle.opacity * PUDDLE_GAIN;
        let Some((_, center_row)) = raster.cell_at(Point::new(puddle.x, puddle.y)) else {
            continue;
        };

        let mut rows = Vec::new();
        raster.trace(
            Point::new(puddle.x, puddle.y - ry),
            Point::new(puddle.x, puddle.y + ry),
            |_, row| rows.push(row),
        );

        let mut cells = Vec::new();
        for row in rows {
            let half = if row == center_row {
                rx
            } else {
                let dy = (Raster::center(0, row).y - puddle.y) / ry.max(f32::EPSILON);
                let spread = 1.0 - dy * dy;
                if spread <= 0.0 {
                    continue;
                }
                rx * spread.sqrt()
            };
            let y = Raster::center(0, row).y;
            raster.trace(
                Point::new(puddle.x - half, y),
                Point::new(puddle.x + half, y),
                |column, cell_row| cells.push((column, cell_row)),
            );
        }

        for (column, row) in cells {
            raster.tint(column, row, water, alpha);
            if row == center_row {
                raster.stamp(column, row, '~', water, alpha * HAIRLINE_GAIN);
            }
        }
    }
}

/// Glyphs in the bolt color overlaid with a white glow, then the branches at
/// reduced opacity.
fn paint_bolt(raster: &mut Raster, bolt: &ThunderBolt, opacity: f32) {
    if bolt.points.len() < 2 || opacity <= 0.0 {
        return;
    }
    let color = rgba_to_rgb(bolt.color);
    let heavy = bolt.width >= HEAVY_WIDTH;

    for pair in bolt.points.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let glyph = stroke_glyph(from, to, heavy);
        let mut cells = Vec::new();
        raster.trace(from, to, |column, row| cells.push((column, row)));
        for (column, row) in cells {
            raster.stamp(column, row, glyph, color, opacity);
            raster.overlay_stroke(column, row, WHITE, opacity * GLOW_SHARE);
        }
    }

    for branch in &bolt.branches {
        paint_bolt(raster, branch, opacity * BRANCH_OPACITY);
    }
}
