//! aod-aggregate
//!
//! Summary statistics and chart-ready segments over an extracted order
//! record sequence:
//!
//! - [`segments`] — status distribution with semantic display colors
//! - [`summary`] — dashboard aggregate (totals, today bucket, revenue,
//!   latest sync detection, sentinel-date quality flags)
//!
//! Computed once per record-sequence snapshot and recomputed from scratch
//! when the snapshot changes — nothing here is incrementally maintained.
//! Pure and deterministic apart from the single `build_summary_now`
//! convenience entry point, which samples the UTC clock and delegates to
//! the pure builder.

pub mod segments;
pub mod summary;

pub use segments::{status_segments, ColorToken, StatusSegment};
pub use summary::{build_summary, build_summary_now, AggregateSummary, InvalidDates, LatestSync};
