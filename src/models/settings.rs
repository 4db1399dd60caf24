use serde::{Deserialize, Serialize};
use stain_mask::{Category, ColorRange, Hsv8, RegionQuantifier, Rgb8};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::presets;
use crate::error::SettingsError;

/// Which of the two masks a range belongs to.
///
/// `Red` is the signal (stain) category, `White` the exclusion (non-tissue
/// background) category. The names match the keys of the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskCategory {
    Red,
    White,
}

impl MaskCategory {
    /// Key used in the settings file.
    pub fn key(self) -> &'static str {
        match self {
            MaskCategory::Red => "red",
            MaskCategory::White => "white",
        }
    }

    /// Human-readable role of the mask.
    pub fn label(self) -> &'static str {
        match self {
            MaskCategory::Red => "stain",
            MaskCategory::White => "non-tissue",
        }
    }
}

impl fmt::Display for MaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "signal" | "stain" => Ok(MaskCategory::Red),
            "white" | "exclusion" | "non-tissue" | "background" => Ok(MaskCategory::White),
            other => Err(format!(
                "unknown mask category '{other}' (expected 'red' or 'white')"
            )),
        }
    }
}

/// Per-axis widths used when a range is derived from a sampled pixel.
///
/// Stored as floats (slider positions); truncated when applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            h: 10.0,
            s: 40.0,
            v: 40.0,
        }
    }
}

impl Tolerance {
    /// Whole-number widths clamped to `0..=255`.
    pub fn to_bytes(self) -> [u8; 3] {
        [self.h, self.s, self.v].map(|t| t.clamp(0.0, 255.0) as u8)
    }
}

/// One range as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEntry {
    pub lower: [u8; 3],
    pub upper: [u8; 3],

    /// Swatch color of the pixel the range was picked from (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<[u8; 3]>,
}

impl RangeEntry {
    pub fn to_range(&self) -> Result<ColorRange, stain_mask::RangeError> {
        ColorRange::new(self.lower, self.upper)
    }

    pub fn swatch(&self) -> Option<Rgb8> {
        self.rgb.map(Rgb8::from_bytes)
    }
}

/// Range lists for both masks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRanges {
    pub red: Vec<RangeEntry>,
    pub white: Vec<RangeEntry>,
}

/// Threshold settings, persisted as JSON (or YAML for `.yaml`/`.yml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Tolerances for ranges picked into the red mask
    #[serde(default)]
    pub red_tolerances: Tolerance,

    /// Tolerances for ranges picked into the white mask
    #[serde(default)]
    pub white_tolerances: Tolerance,

    pub hsv_ranges: HsvRanges,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()),
        Some(ref e) if e == "yaml" || e == "yml"
    )
}

impl Settings {
    /// Build settings from two preset names.
    pub fn from_presets(signal: &str, exclusion: &str) -> Result<Self, SettingsError> {
        let red = presets::preset(signal)
            .ok_or_else(|| SettingsError::UnknownPreset(signal.to_string()))?;
        let white = presets::preset(exclusion)
            .ok_or_else(|| SettingsError::UnknownPreset(exclusion.to_string()))?;

        Ok(Self {
            red_tolerances: Tolerance::default(),
            white_tolerances: Tolerance::default(),
            hsv_ranges: HsvRanges {
                red: red.entries(),
                white: white.entries(),
            },
        })
    }

    /// Load and validate a settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = if is_yaml(path) {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        tracing::info!(
            path = %path.display(),
            red = settings.hsv_ranges.red.len(),
            white = settings.hsv_ranges.white.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Pretty JSON with 4-space indentation.
    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write to `path`, as YAML when the extension asks for it.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            self.to_json_string()?
        };
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Reject malformed ranges before any image is processed.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.ranges(MaskCategory::Red)?;
        self.ranges(MaskCategory::White)?;
        Ok(())
    }

    pub fn entries(&self, category: MaskCategory) -> &[RangeEntry] {
        match category {
            MaskCategory::Red => &self.hsv_ranges.red,
            MaskCategory::White => &self.hsv_ranges.white,
        }
    }

    fn entries_mut(&mut self, category: MaskCategory) -> &mut Vec<RangeEntry> {
        match category {
            MaskCategory::Red => &mut self.hsv_ranges.red,
            MaskCategory::White => &mut self.hsv_ranges.white,
        }
    }

    pub fn tolerance(&self, category: MaskCategory) -> Tolerance {
        match category {
            MaskCategory::Red => self.red_tolerances,
            MaskCategory::White => self.white_tolerances,
        }
    }

    /// Validated ranges of one mask.
    pub fn ranges(&self, category: MaskCategory) -> Result<Vec<ColorRange>, SettingsError> {
        self.entries(category)
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry.to_range().map_err(|source| SettingsError::Range {
                    category: category.key(),
                    index,
                    source,
                })
            })
            .collect()
    }

    pub fn quantifier(&self) -> Result<RegionQuantifier, SettingsError> {
        Ok(RegionQuantifier::new(
            Category::new(MaskCategory::Red.key(), self.ranges(MaskCategory::Red)?),
            Category::new(MaskCategory::White.key(), self.ranges(MaskCategory::White)?),
        ))
    }

    /// Append a range around a sampled pixel, widened by the category's
    /// tolerance.
    pub fn add_range(&mut self, category: MaskCategory, center: Hsv8, swatch: Rgb8) -> ColorRange {
        let range = ColorRange::around(center, self.tolerance(category).to_bytes());
        self.entries_mut(category).push(RangeEntry {
            lower: range.lower(),
            upper: range.upper(),
            rgb: Some(swatch.to_bytes()),
        });
        tracing::debug!(category = %category, range = %range, "Added range");
        range
    }

    pub fn remove_range(
        &mut self,
        category: MaskCategory,
        index: usize,
    ) -> Result<RangeEntry, SettingsError> {
        let entries = self.entries_mut(category);
        if index >= entries.len() {
            return Err(SettingsError::NoSuchRange {
                category: category.key(),
                index,
            });
        }
        Ok(entries.remove(index))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            red_tolerances: Tolerance::default(),
            white_tolerances: Tolerance::default(),
            hsv_ranges: HsvRanges {
                red: vec![RangeEntry {
                    lower: [154, 118, 106],
                    upper: [194, 249, 206],
                    rgb: None,
                }],
                white: vec![RangeEntry {
                    lower: [6, 0, 145],
                    upper: [46, 40, 245],
                    rgb: None,
                }],
            },
        }
    }
}
