//! Snapshot export for external renderers
//!
//! Renderers (board views, heatmaps, win-ratio plots) live outside the
//! crate. This module hands them read-only snapshots as CSV, JSON or text.

mod playbook_json;
mod text;
mod win_ratio_csv;

pub use playbook_json::{
    HeatmapSnapshot, PlaybookSnapshot, playbook_snapshot, write_playbook, write_playbook_json,
};
pub use text::heatmap_text;
pub use win_ratio_csv::{WinRatioRecord, win_ratio_records, write_win_ratio, write_win_ratio_csv};
