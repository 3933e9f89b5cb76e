use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::config::QueryConfig;
use crate::error::{Result, TermsiftError};
use crate::index::IndexGeneration;
use crate::models::{
    DisplayTerm, SampleGroup, SampleQuery, SampleSearchResult, Study, StudyResult, TermFacet,
};

use super::{MISSING_FILTER_MESSAGE, QUERY_TOO_BROAD_MESSAGE};

struct StudyBucket<'a> {
    study: &'a Study,
    groups: Vec<usize>,
    sample_count: usize,
    dterms: BTreeSet<&'a DisplayTerm>,
}

/// Faceted sample search over one index generation.
///
/// Runs select, group by study, facet, sort and paginate. Facets and counts
/// are computed over every matching study; only the requested page is
/// materialized into the result.
pub fn search_samples(
    index: &IndexGeneration,
    query: &SampleQuery,
    config: &QueryConfig,
) -> Result<SampleSearchResult> {
    if query.and_terms.is_empty() && query.study_id.is_none() {
        return Err(TermsiftError::InvalidQuery(
            MISSING_FILTER_MESSAGE.to_string(),
        ));
    }

    let matched = select_groups(index, query);
    if matched.len() > config.max_matched_groups {
        debug!(
            matched = matched.len(),
            budget = config.max_matched_groups,
            "sample query over matched-group budget"
        );
        return Err(TermsiftError::QueryTooBroad(
            QUERY_TOO_BROAD_MESSAGE.to_string(),
        ));
    }

    let mut buckets = bucket_by_study(index, &matched);
    let terms = term_facets(&buckets);
    buckets.sort_by(|a, b| {
        b.sample_count
            .cmp(&a.sample_count)
            .then_with(|| a.study.id.cmp(&b.study.id))
    });

    let study_count = buckets.len();
    let sample_count = buckets.iter().map(|bucket| bucket.sample_count).sum();
    let studies = buckets
        .into_iter()
        .skip(query.skip)
        .take(query.limit.unwrap_or(usize::MAX))
        .map(|bucket| StudyResult {
            study: bucket.study.clone(),
            sample_groups: bucket
                .groups
                .iter()
                .map(|idx| index.group(*idx).view())
                .collect(),
            sample_count: bucket.sample_count,
            dterms: bucket.dterms.into_iter().cloned().collect(),
        })
        .collect();

    Ok(SampleSearchResult {
        study_count,
        sample_count,
        skip: query.skip,
        limit: query.limit,
        studies,
        terms,
    })
}

/// Indices of every group satisfying all filters, in index order.
fn select_groups(index: &IndexGeneration, query: &SampleQuery) -> Vec<usize> {
    let candidates = if query.and_terms.is_empty() {
        match &query.study_id {
            Some(study_id) => index.groups_in_study(study_id),
            None => &[],
        }
    } else {
        query
            .and_terms
            .iter()
            .map(|term| index.groups_with_term(term))
            .min_by_key(|postings| postings.len())
            .unwrap_or(&[])
    };

    candidates
        .iter()
        .copied()
        .filter(|idx| matches_query(index.group(*idx), query))
        .collect()
}

fn matches_query(group: &SampleGroup, query: &SampleQuery) -> bool {
    let has = |term: &String| group.closure_terms.binary_search(term).is_ok();
    if !query.and_terms.iter().all(has) {
        return false;
    }
    if query.not_terms.iter().any(has) {
        return false;
    }
    if let Some(study_id) = &query.study_id
        && &group.study.id != study_id
    {
        return false;
    }
    if let Some(sample_type) = &query.sample_type {
        return group
            .sample_type
            .as_ref()
            .is_some_and(|found| &found.label == sample_type);
    }
    true
}

fn bucket_by_study<'a>(index: &'a IndexGeneration, matched: &[usize]) -> Vec<StudyBucket<'a>> {
    let mut by_study = BTreeMap::<&str, StudyBucket<'a>>::new();
    for idx in matched {
        let group = index.group(*idx);
        let bucket = by_study
            .entry(group.study.id.as_str())
            .or_insert_with(|| StudyBucket {
                study: &group.study,
                groups: Vec::new(),
                sample_count: 0,
                dterms: BTreeSet::new(),
            });
        bucket.groups.push(*idx);
        bucket.sample_count += group.sample_count();
        bucket.dterms.extend(group.display_terms.iter());
    }
    by_study.into_values().collect()
}

/// Each display term weighted by the sample counts of the studies showing it.
fn term_facets(buckets: &[StudyBucket<'_>]) -> Vec<TermFacet> {
    let mut counts = HashMap::<&DisplayTerm, usize>::new();
    for bucket in buckets {
        for dterm in &bucket.dterms {
            *counts.entry(*dterm).or_default() += bucket.sample_count;
        }
    }
    let mut facets = counts.into_iter().collect::<Vec<_>>();
    facets.sort_by_key(|(dterm, count)| (Reverse(*count), *dterm));
    facets
        .into_iter()
        .map(|(dterm, sample_count)| TermFacet {
            dterm: dterm.clone(),
            sample_count,
        })
        .collect()
}
