use chrono::{DateTime, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Every calendar day from `start` to `end`, both included.
/// When `start` is after `end` the result is `[start]`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return vec![start];
    }

    let mut out = Vec::new();
    let mut d = start;

    while d <= end {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

/// Format an optional timestamp, `--` when absent.
pub fn format_opt_timestamp(ts: Option<&DateTime<Local>>, fmt: &str) -> String {
    ts.map(|t| t.format(fmt).to_string())
        .unwrap_or_else(|| "--".to_string())
}
