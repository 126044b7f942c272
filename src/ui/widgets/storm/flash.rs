use super::Raster;
use crate::{domain::flash::LightningFlash, ui::color::rgba_to_rgb};

/// Full-screen wash in the flash color; the last layer under the card.
pub(super) fn paint(raster: &mut Raster, flash: &LightningFlash) {
    raster.tint_all(rgba_to_rgb(flash.color), flash.opacity * flash.color.a);
}
