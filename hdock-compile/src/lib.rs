//! Turns a list of docking jobs into one summary workbook.
//!
//! [`jobs`] reads the `<complex_id> <url>` list, [`Compiler`] scrapes each
//! job in turn, and [`workbook`] lays the results out as stacked blocks on
//! a single worksheet.

pub mod compile;
pub mod jobs;
pub mod workbook;

pub use compile::{CompileError, CompileOptions, CompileSummary, Compiler, ResultBlock};
pub use jobs::{Job, JobList, SkippedLine, parse_job_list};
