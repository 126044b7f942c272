use super::Raster;
use crate::{
    scene::reflection::{BAND_ALPHA, ReflectionLayer, band},
    ui::color::{WHITE, rgb},
};

/// Darkening band fading in towards the bottom edge, then the glints.
pub(super) fn paint(raster: &mut Raster, layer: &ReflectionLayer) {
    let viewport = raster.viewport();
    let (top, height) = band(viewport);
    if height <= 0.0 {
        return;
    }
    let shade = rgb(20, 20, 30);

    for row in 0..raster.rows() {
        let y = Raster::center(0, row).y;
        if y < top {
            continue;
        }
        let alpha = BAND_ALPHA * ((y - top) / height).min(1.0);
        for column in 0..raster.columns() {
            raster.tint(column, row, shade, alpha);
        }
    }

    for glint in &layer.glints {
        for row in 0..raster.rows() {
            let center = Raster::center(0, row);
            if center.y < glint.y || center.y > glint.y + glint.height {
                continue;
            }
            for column in 0..raster.columns() {
                let x = Raster::center(column, row).x;
                if x >= glint.x && x <= glint.x + glint.width {
                    raster.tint(column, row, WHITE, glint.alpha);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::*;
    use crate::scene::reflection::Glint;

    #[test]
    fn band_darkens_only_the_bottom_rows() {
        let mut raster = Raster::new(Rect::new(0, 0, 4, 20));
        paint(&mut raster, &ReflectionLayer::default());
        assert_eq!(raster.background(0, 0), raster.background(0, 10));
        let top = raster.background(0, 0).expect("cell");
        let bottom = raster.background(0, 19).expect("cell");
        assert!(bottom.2 > top.2 || bottom.0 != top.0);
    }

    #[test]
    fn glint_brightens_its_cells() {
        let mut raster = Raster::new(Rect::new(0, 0, 20, 20));
        let layer = ReflectionLayer {
            glints: vec![Glint {
                x: 0.0,
                y: 240.0,
                width: 64.0,
                height: 40.0,
                alpha: 0.25,
            }],
        };
        paint(&mut raster, &layer);
        let lit = raster.background(2, 15).expect("cell");
        let dark = raster.background(15, 15).expect("cell");
        assert!(lit.0 > dark.0 + 20.0);
    }
}
