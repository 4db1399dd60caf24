use super::settings::RangeEntry;

/// A named, built-in HSV range set.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    /// `(lower, upper)` pairs in `[H, S, V]`
    pub bounds: &'static [([u8; 3], [u8; 3])],
}

impl Preset {
    /// Settings-file entries for this preset (no swatch color).
    pub fn entries(&self) -> Vec<RangeEntry> {
        self.bounds
            .iter()
            .map(|&(lower, upper)| RangeEntry {
                lower,
                upper,
                rgb: None,
            })
            .collect()
    }
}

/// Built-in color table. `red` and `white` are the defaults for
/// picrosirius-red stain and slide background.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "red",
        description: "picrosirius red stain",
        bounds: &[([154, 118, 106], [194, 249, 206])],
    },
    Preset {
        name: "yellow",
        description: "minor hue band",
        bounds: &[([21, 39, 64], [40, 255, 255])],
    },
    Preset {
        name: "green",
        description: "major hue band",
        bounds: &[([41, 39, 64], [80, 255, 255])],
    },
    Preset {
        name: "cyan",
        description: "minor hue band",
        bounds: &[([81, 39, 64], [100, 255, 255])],
    },
    Preset {
        name: "blue",
        description: "major hue band",
        bounds: &[([101, 39, 64], [140, 255, 255])],
    },
    Preset {
        name: "violet",
        description: "minor hue band",
        bounds: &[([141, 39, 64], [160, 255, 255])],
    },
    Preset {
        name: "black",
        description: "any hue and saturation, lowest quarter of value",
        bounds: &[([0, 0, 0], [180, 255, 63])],
    },
    Preset {
        name: "gray",
        description: "any hue, low saturation, mid value",
        bounds: &[([0, 0, 64], [180, 38, 228])],
    },
    Preset {
        name: "white",
        description: "unstained slide background",
        bounds: &[([6, 0, 145], [46, 40, 245])],
    },
];

/// Look up a preset by case-insensitive name.
pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
