use std::path::PathBuf;

use clap::Parser;

/// Settings file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "hdock.yaml";

#[derive(Debug, Parser)]
#[command(
    name = "hdock-compile",
    version,
    about = "Compile HDOCK results into a single-sheet Excel workbook with download links"
)]
pub struct Cli {
    /// Job list: one `<complex_id> <url>` per line.
    #[arg(short, long, default_value = "hdock_urls.txt")]
    pub input: PathBuf,

    /// Workbook to write.
    #[arg(short, long, default_value = "compiled_hdock_results.xlsx")]
    pub output: PathBuf,

    /// YAML settings file (HTTP identity, timeout, pause, sheet name).
    #[arg(short, long, env = "HDOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the rolling log file.
    #[arg(long, env = "HDOCK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,
}
