use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::DECLARED_REGIONS;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Opacity applied to markers and legend swatches outside the active filter.
pub const DIM_FACTOR: f32 = 0.2;

/// Fixed colors for the declared regions, in [`DECLARED_REGIONS`] order.
const DECLARED_COLORS: [Color32; 3] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4), // North America
    Color32::from_rgb(0xd6, 0x27, 0x28), // Europe
    Color32::from_rgb(0x2c, 0xa0, 0x2c), // Asia
];

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Region → Color32 mapping
// ---------------------------------------------------------------------------

/// Maps region labels to marker/legend colours.  Declared regions keep their
/// fixed colours; regions only present in the data get generated hues.
#[derive(Debug, Clone)]
pub struct RegionPalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl RegionPalette {
    /// Build the palette for a dataset's region list.
    pub fn new(regions: &[String]) -> Self {
        let mut mapping: BTreeMap<String, Color32> = DECLARED_REGIONS
            .iter()
            .zip(DECLARED_COLORS)
            .map(|(r, c)| (r.to_string(), c))
            .collect();

        let extras: Vec<&String> = regions
            .iter()
            .filter(|r| !DECLARED_REGIONS.contains(&r.as_str()))
            .collect();
        let generated = generate_palette(extras.len());
        for (region, color) in extras.into_iter().zip(generated) {
            mapping.insert(region.clone(), color);
        }

        RegionPalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a region label.
    pub fn color_for(&self, region: &str) -> Color32 {
        self.mapping
            .get(region)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// The de-emphasized variant used for filtered-out markers and swatches.
    pub fn dimmed(color: Color32) -> Color32 {
        color.gamma_multiply(DIM_FACTOR)
    }
}

impl Default for RegionPalette {
    fn default() -> Self {
        Self::new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_regions_keep_fixed_colors() {
        let palette = RegionPalette::default();
        assert_eq!(
            palette.color_for("North America"),
            Color32::from_rgb(0x1f, 0x77, 0xb4)
        );
        assert_eq!(palette.color_for("Europe"), Color32::from_rgb(0xd6, 0x27, 0x28));
        assert_eq!(palette.color_for("Asia"), Color32::from_rgb(0x2c, 0xa0, 0x2c));
    }

    #[test]
    fn extra_regions_get_distinct_generated_colors() {
        let regions: Vec<String> = ["North America", "Europe", "Asia", "Oceania", "Africa"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let palette = RegionPalette::new(&regions);

        let oceania = palette.color_for("Oceania");
        let africa = palette.color_for("Africa");
        assert_ne!(oceania, palette.color_for("Unknown"));
        assert_ne!(oceania, africa);
    }

    #[test]
    fn unknown_region_falls_back_to_gray() {
        let palette = RegionPalette::default();
        assert_eq!(palette.color_for("Atlantis"), Color32::GRAY);
    }

    #[test]
    fn palette_sizes_match_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }
}
