use super::Raster;
use crate::{
    domain::flash::LightningFlash,
    scene::fog::FogLayer,
    ui::color::{WHITE, rgb},
};

/// Share of the flash opacity the fog layer lights up with.
const FLASH_GLOW: f32 = 0.2;

/// Static mist thickening towards the bottom: `(height share, alpha)` stops.
const MIST_STOPS: [(f32, f32); 3] = [(0.0, 0.0), (0.75, 0.03), (1.0, 0.05)];

pub(super) fn paint(raster: &mut Raster, layer: &FogLayer, flash: &LightningFlash) {
    let mist = rgb(200, 200, 220);
    let height = raster.viewport().height;

    for row in 0..raster.rows() {
        let alpha = mist_alpha(Raster::center(0, row).y / height);
        for column in 0..raster.columns() {
            raster.tint(column, row, mist, alpha);
        }
    }

    for particle in &layer.particles {
        let radius = particle.radius.max(1.0);
        let (Some(top_left), Some(bottom_right)) = (
            clamp_cell(raster, particle.x - radius, particle.y - radius),
            clamp_cell(raster, particle.x + radius, particle.y + radius),
        ) else {
            continue;
        };
        for row in top_left.1..=bottom_right.1 {
            for column in top_left.0..=bottom_right.0 {
                let center = Raster::center(column, row);
                let distance = (center.x - particle.x).hypot(center.y - particle.y);
                if distance < radius {
                    let alpha = particle.opacity * (1.0 - distance / radius);
                    raster.tint(column, row, mist, alpha);
                }
            }
        }
    }

    if flash.is_bright() {
        raster.tint_all(WHITE, flash.opacity * FLASH_GLOW);
    }
}

fn mist_alpha(share: f32) -> f32 {
    let share = share.clamp(0.0, 1.0);
    MIST_STOPS
        .windows(2)
        .find(|pair| share <= pair[1].0)
        .map_or(MIST_STOPS[2].1, |pair| {
            let (start, from) = pair[0];
            let (end, to) = pair[1];
            from + (to - from) * (share - start) / (end - start)
        })
}

/// Nearest on-screen cell to a pixel position, `None` when the raster is
/// empty.
fn clamp_cell(raster: &Raster, x: f32, y: f32) -> Option<(i32, i32)> {
    if raster.columns() == 0 || raster.rows() == 0 {
        return None;
    }
    let viewport = raster.viewport();
    let point = crate::domain::Point::new(
        x.clamp(0.0, viewport.width - 1.0),
        y.clamp(0.0, viewport.height - 1.0),
    );
    raster.cell_at(point)
}
