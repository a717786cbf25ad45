use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::ChartConfig;
use crate::data::model::Gender;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

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
            to_color32(rgb.into_format())
        })
        .collect()
}

/// Convert an 8-bit sRGB colour into an egui colour.
pub fn to_color32(rgb: Srgb<u8>) -> Color32 {
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: gender → Color32
// ---------------------------------------------------------------------------

/// Maps the observed genders to scatter colours. Male and female use the
/// configured colours; any other label gets a generated one.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Gender, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(genders: &[Gender], charts: &ChartConfig) -> Self {
        let others: Vec<&Gender> = genders
            .iter()
            .filter(|g| matches!(g, Gender::Other(_)))
            .collect();
        let mut palette = generate_palette(others.len()).into_iter();

        let mapping = genders
            .iter()
            .map(|g| {
                let color = match g {
                    Gender::Male => charts.male_color,
                    Gender::Female => charts.female_color,
                    Gender::Other(_) => palette.next().unwrap_or(Color32::GRAY),
                };
                (g.clone(), color)
            })
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given gender.
    pub fn color_for(&self, gender: &Gender) -> Color32 {
        self.mapping
            .get(gender)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(3);
        assert_eq!(colours.len(), 3);
        assert_ne!(colours[0], colours[1]);
    }

    #[test]
    fn known_genders_use_configured_colours() {
        let charts = ChartConfig::default();
        let genders = vec![
            Gender::Male,
            Gender::Female,
            Gender::Other("X".to_string()),
        ];
        let map = ColorMap::new(&genders, &charts);

        assert_eq!(map.color_for(&Gender::Male), charts.male_color);
        assert_eq!(map.color_for(&Gender::Female), charts.female_color);
        assert_ne!(map.color_for(&genders[2]), Color32::GRAY);
        assert_eq!(map.color_for(&Gender::Other("Y".into())), Color32::GRAY);
    }
}
