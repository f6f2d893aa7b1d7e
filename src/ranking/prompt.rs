use std::collections::HashSet;

use crate::catalog::CategoryPath;

use super::error::RankError;

/// Renders the ranking prompt: the description, then one `->`-joined path per line.
pub fn build_prompt(description: &str, candidates: &[CategoryPath]) -> String {
    let mut prompt = String::new();
    prompt.push_str("Given the following product description:\n");
    prompt.push_str(description);
    prompt.push_str("\n\nRank the following categories from most relevant to least:\n");
    for candidate in candidates {
        prompt.push_str(&candidate.to_string());
        prompt.push('\n');
    }
    prompt
}

/// Removes leading whitespace and a leading `<digits>.<whitespace>` ordinal.
///
/// `"  2.  Shoes->Running"` becomes `"Shoes->Running"`. A number not followed by a dot and
/// whitespace (e.g. `"3.5mm Jacks"`) is left alone.
pub fn strip_ordinal(line: &str) -> &str {
    let line = line.trim_start();
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }

    let Some(after_dot) = line[digits..].strip_prefix('.') else {
        return line;
    };
    let rest = after_dot.trim_start();
    if rest.len() == after_dot.len() {
        return line;
    }
    rest
}

/// Parses the LLM reply into paths, one per non-blank line.
///
/// Only the first path is checked against `expected_depth`.
pub fn parse_response(
    response: &str,
    expected_depth: usize,
) -> Result<Vec<CategoryPath>, RankError> {
    let paths: Vec<CategoryPath> = response
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| CategoryPath::parse(strip_ordinal(line.trim_end())))
        .collect();

    let first = paths.first().ok_or(RankError::EmptyResponse)?;
    if first.depth() != expected_depth {
        return Err(RankError::SchemaMismatch {
            response: first.to_string(),
            expected: expected_depth,
            actual: first.depth(),
        });
    }

    Ok(paths)
}

/// Keeps the first occurrence of each path, preserving order.
pub fn dedup_paths<I>(paths: I) -> Vec<CategoryPath>
where
    I: IntoIterator<Item = CategoryPath>,
{
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}
