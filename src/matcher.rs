//! Program-name lookup over a fetched catalog.

use serde_json::Value;

/// Upper bound on the names suggested after a failed lookup.
pub const SUGGESTION_LIMIT: usize = 10;

/// Outcome of a catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    Found(&'a Value),
    NotFound { suggestions: Vec<String> },
}

/// Find the first program whose name fuzzily matches `query`.
///
/// Matching is case-insensitive containment in either direction, so an
/// abbreviated query ("nike") and a padded one ("Nike Affiliate Program
/// Extended") both land on "Nike Affiliate Program". The first match in
/// upstream order wins; there is no ranking. On no match, the outcome
/// carries the first [`SUGGESTION_LIMIT`] program names in upstream order
/// as user-facing suggestions.
pub fn find<'a>(programs: &'a [Value], query: &str) -> MatchOutcome<'a> {
    let needle = query.trim().to_lowercase();
    for program in programs {
        let Some(name) = program_name(program) else {
            continue;
        };
        let candidate = name.to_lowercase();
        if candidate.is_empty() {
            continue;
        }
        if candidate.contains(&needle) || needle.contains(&candidate) {
            return MatchOutcome::Found(program);
        }
    }
    MatchOutcome::NotFound {
        suggestions: suggestion_names(programs),
    }
}

fn program_name(program: &Value) -> Option<&str> {
    program.get("ProgramName").and_then(Value::as_str)
}

fn suggestion_names(programs: &[Value]) -> Vec<String> {
    programs
        .iter()
        .filter_map(program_name)
        .take(SUGGESTION_LIMIT)
        .map(str::to_string)
        .collect()
}
