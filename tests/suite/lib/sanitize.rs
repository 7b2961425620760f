use std::sync::LazyLock;

use regex::Regex;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches: finished in 0.00s
    Regex::new(r"finished in \d+\.\d+s").unwrap()
});

pub fn sanitize_duration(input: &str) -> String {
    DURATION_RE
        .replace_all(input, "finished in <duration>")
        .to_string()
}
