use std::io::{self, Write};

use anyhow::Result;
use serde_json::json;

use termsift_core::TermsiftError;
use termsift_core::models::{SampleQueryParams, TermQueryParams};

use crate::cli::{SamplesArgs, TermsArgs};

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(super) fn print_text(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}

/// Caller mistakes print the same body the HTTP API answers with.
pub(super) fn user_error(err: &TermsiftError, with_terms: bool) -> Result<()> {
    let body = error_body(err, with_terms);
    print_json(&body)
}

pub(super) fn error_body(err: &TermsiftError, with_terms: bool) -> serde_json::Value {
    if with_terms {
        json!({ "error": err.to_string(), "terms": [] })
    } else {
        json!({ "error": err.to_string() })
    }
}

pub(super) fn sample_params(args: SamplesArgs) -> SampleQueryParams {
    SampleQueryParams {
        and: args.and,
        not: args.not,
        study: args.study,
        sampletype: args.sampletype,
        skip: args.skip,
        limit: args.limit,
    }
}

pub(super) fn term_params(args: TermsArgs) -> TermQueryParams {
    TermQueryParams {
        q: args.q,
        id: args.id,
        limit: args.limit,
    }
}
