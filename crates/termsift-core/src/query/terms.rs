use std::cmp::Reverse;
use std::collections::BTreeSet;

use tracing::debug;

use crate::index::IndexGeneration;
use crate::models::{TermEntry, TermLookupResult, TermQuery};
use crate::tokens::{depluralize, tokenize};

/// Term autocomplete, retrying once with depluralized tokens when the
/// literal query text matches nothing.
#[must_use]
pub fn lookup_terms_with_fallback(index: &IndexGeneration, query: &TermQuery) -> TermLookupResult {
    let found = lookup_terms(index, query, false);
    if !found.terms.is_empty() || query.text.is_none() {
        return found;
    }
    debug!(text = ?query.text, "no term matches, retrying with depluralized tokens");
    lookup_terms(index, query, true)
}

/// Every query token must prefix some token of an entry; `ids` restricts
/// the result to entries carrying at least one of them.
///
/// With text, entries rank by how many query tokens prefix a token of the
/// entry name, then by shorter name. Without text, only by shorter name.
#[must_use]
pub fn lookup_terms(
    index: &IndexGeneration,
    query: &TermQuery,
    depluralize_tokens: bool,
) -> TermLookupResult {
    let query_tokens = query.text.as_deref().map(|text| {
        tokenize(text)
            .into_iter()
            .map(|token| {
                if depluralize_tokens {
                    depluralize(&token).to_string()
                } else {
                    token
                }
            })
            .collect::<BTreeSet<_>>()
    });

    let mut candidates = match &query_tokens {
        Some(tokens) => tokens.iter().fold(index.all_entries(), |acc, token| {
            if acc.is_empty() {
                return acc;
            }
            let hits = index.entries_with_token_prefix(token);
            acc.intersection(&hits).copied().collect()
        }),
        None => index.all_entries(),
    };
    if !query.ids.is_empty() {
        let by_id = query
            .ids
            .iter()
            .flat_map(|id| index.entries_with_id(id).iter().copied())
            .collect::<BTreeSet<_>>();
        candidates.retain(|idx| by_id.contains(idx));
    }

    let mut ranked = candidates
        .into_iter()
        .map(|idx| index.term(idx))
        .map(|entry| {
            let namematch = query_tokens
                .as_ref()
                .map_or(0, |tokens| name_match(entry, tokens));
            (entry, namematch)
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|(a, a_match), (b, b_match)| {
        (Reverse(*a_match), a.score, &a.name).cmp(&(Reverse(*b_match), b.score, &b.name))
    });

    TermLookupResult {
        terms: ranked
            .into_iter()
            .take(query.limit)
            .map(|(entry, _)| entry.view())
            .collect(),
    }
}

/// Number of query tokens that prefix at least one token of the entry name.
fn name_match(entry: &TermEntry, query_tokens: &BTreeSet<String>) -> usize {
    query_tokens
        .iter()
        .filter(|token| {
            entry
                .name_tokens
                .iter()
                .any(|name_token| name_token.starts_with(token.as_str()))
        })
        .count()
}
