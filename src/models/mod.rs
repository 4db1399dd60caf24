pub mod presets;
pub mod report;
pub mod settings;

pub use presets::{preset, Preset, PRESETS};
pub use report::{Report, ReportRow, REPORT_COLUMNS, UNDEFINED_RATIO};
pub use settings::{HsvRanges, MaskCategory, RangeEntry, Settings, Tolerance};
