//! The job list: one `<complex_id> <url>` pair per line.
//!
//! Blank lines and `#` comments are ignored. Lines that do not yield an id
//! and an absolute URL are reported and skipped; they never abort a run.

use url::Url;

/// One job to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// 1-based line in the list file.
    pub line: usize,
    pub complex_id: String,
    /// Always ends in `/`.
    pub base_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobList {
    pub jobs: Vec<Job>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse the whole list, logging a warning for every skipped line.
///
/// ```
/// use hdock_compile::parse_job_list;
///
/// let list = parse_job_list("# jobs\n1ab2 http://hdock.example.org/data/1ab2\n\nlonely\n");
/// assert_eq!(list.jobs.len(), 1);
/// assert_eq!(list.jobs[0].base_url.as_str(), "http://hdock.example.org/data/1ab2/");
/// assert_eq!(list.skipped[0].line, 4);
/// ```
pub fn parse_job_list(text: &str) -> JobList {
    let mut list = JobList::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        match parse_line(raw) {
            Ok((complex_id, base_url)) => list.jobs.push(Job {
                line,
                complex_id,
                base_url,
            }),
            Err(reason) => {
                tracing::warn!(line, %reason, "compile.input.bad_line");
                list.skipped.push(SkippedLine { line, reason });
            }
        }
    }
    list
}

fn parse_line(raw: &str) -> Result<(String, Url), String> {
    let Some((id, rest)) = raw.split_once(char::is_whitespace) else {
        return Err("bad format: expected `<complex_id> <url>`".to_string());
    };
    let url = Url::parse(rest.trim()).map_err(|e| format!("invalid URL: {e}"))?;
    if url.cannot_be_a_base() {
        return Err(format!("invalid URL: {url} has no path"));
    }
    Ok((id.to_string(), ensure_trailing_slash(url)))
}

/// Make `url` name a directory so relative candidates resolve inside it.
pub fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
