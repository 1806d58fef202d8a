//! 스캐너 모듈.

pub mod report;
pub mod scan;

pub use report::{run_report, ReportFilter, ReportOptions};
pub use scan::{load_universe, run_scan, scan_to_file, select_codes, ScanOptions, ScanOutcome};
