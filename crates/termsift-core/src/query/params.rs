use crate::error::{Result, TermsiftError};
use crate::models::{SampleQuery, SampleQueryParams, TermQuery, TermQueryParams};

use super::{MISSING_TERMS_MESSAGE, NON_INTEGER_LIMIT_MESSAGE};

/// Normalize raw sample-search parameters.
///
/// Term lists are comma separated, trimmed and uppercased. Pagination never
/// fails: a bad `skip` becomes 0 and a bad or non-positive `limit` means no
/// limit. The missing-filter check runs in [`super::search_samples`].
#[must_use]
pub fn parse_sample_query(params: &SampleQueryParams) -> SampleQuery {
    SampleQuery {
        and_terms: split_list(params.and.as_deref(), str::to_uppercase),
        not_terms: split_list(params.not.as_deref(), str::to_uppercase),
        study_id: non_empty(params.study.as_deref()).map(|study| study.to_uppercase()),
        sample_type: non_empty(params.sampletype.as_deref())
            .map(|raw| raw.replace("%20", " ").replace('+', " ")),
        skip: params
            .skip
            .as_deref()
            .and_then(parse_integer)
            .map_or(0, |skip| usize::try_from(skip).unwrap_or(0)),
        limit: params
            .limit
            .as_deref()
            .and_then(parse_integer)
            .and_then(|limit| usize::try_from(limit).ok())
            .filter(|limit| *limit > 0),
    }
}

/// Normalize raw autocomplete parameters.
///
/// A missing or non-positive limit, or one above `cap`, is clamped to `cap`.
/// A non-integer limit and a request with neither text nor ids are rejected.
pub fn parse_term_query(params: &TermQueryParams, cap: usize) -> Result<TermQuery> {
    let limit = match non_empty(params.limit.as_deref()) {
        Some(raw) => parse_integer(raw)
            .ok_or_else(|| TermsiftError::InvalidQuery(NON_INTEGER_LIMIT_MESSAGE.to_string()))?,
        None => 0,
    };
    let limit = usize::try_from(limit)
        .ok()
        .filter(|limit| *limit > 0 && *limit <= cap)
        .unwrap_or(cap);

    let text = non_empty(params.q.as_deref()).map(str::to_string);
    let ids = split_list(params.id.as_deref(), str::to_string);
    if text.is_none() && ids.is_empty() {
        return Err(TermsiftError::InvalidQuery(
            MISSING_TERMS_MESSAGE.to_string(),
        ));
    }
    Ok(TermQuery { text, ids, limit })
}

fn split_list(raw: Option<&str>, normalize: fn(&str) -> String) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(normalize)
            .collect()
    })
    .unwrap_or_default()
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
