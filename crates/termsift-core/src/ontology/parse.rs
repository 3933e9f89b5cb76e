use crate::error::{Result, TermsiftError};

use super::Relation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct OboTerm {
    pub(super) id: String,
    pub(super) name: Option<String>,
    pub(super) synonyms: Vec<String>,
    pub(super) parents: Vec<(Relation, String)>,
    pub(super) obsolete: bool,
}

#[derive(Debug, Default)]
struct PendingTerm {
    stanza_line: usize,
    id: Option<String>,
    name: Option<String>,
    synonyms: Vec<String>,
    parents: Vec<(Relation, String)>,
    obsolete: bool,
}

impl PendingTerm {
    fn finish(self) -> Result<OboTerm> {
        let Some(id) = self.id else {
            return Err(TermsiftError::OboParse {
                line: self.stanza_line,
                message: "[Term] stanza has no id".to_string(),
            });
        };
        Ok(OboTerm {
            id,
            name: self.name,
            synonyms: self.synonyms,
            parents: self.parents,
            obsolete: self.obsolete,
        })
    }
}

/// Parse the `[Term]` stanzas of an OBO flat file.
///
/// Header tags and non-term stanzas (`[Typedef]`, `[Instance]`) are skipped.
pub(super) fn parse_obo(text: &str) -> Result<Vec<OboTerm>> {
    let mut terms = Vec::new();
    let mut current: Option<PendingTerm> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }
        if line.starts_with('[') {
            if let Some(pending) = current.take() {
                terms.push(pending.finish()?);
            }
            if line == "[Term]" {
                current = Some(PendingTerm {
                    stanza_line: line_no,
                    ..PendingTerm::default()
                });
            }
            continue;
        }
        let Some(term) = current.as_mut() else {
            continue;
        };
        let Some((tag, value)) = line.split_once(':') else {
            return Err(parse_error(line_no, format!("expected `tag: value`, got {line:?}")));
        };
        let value = value.trim();
        match tag.trim() {
            "id" => term.id = Some(value.to_string()),
            "name" => term.name = Some(value.to_string()),
            "synonym" => {
                let synonym = parse_quoted(value)
                    .ok_or_else(|| parse_error(line_no, format!("unquoted synonym: {value:?}")))?;
                term.synonyms.push(synonym);
            }
            "is_a" => {
                let target = strip_trailing_comment(value)
                    .split_whitespace()
                    .next()
                    .ok_or_else(|| parse_error(line_no, "is_a without target".to_string()))?;
                term.parents.push((Relation::IsA, target.to_string()));
            }
            "relationship" => {
                let mut parts = strip_trailing_comment(value).split_whitespace();
                let (Some(relation), Some(target)) = (parts.next(), parts.next()) else {
                    return Err(parse_error(
                        line_no,
                        format!("relationship needs a type and a target: {value:?}"),
                    ));
                };
                term.parents
                    .push((Relation::parse(relation), target.to_string()));
            }
            "is_obsolete" => term.obsolete = value.eq_ignore_ascii_case("true"),
            _ => {}
        }
    }

    if let Some(pending) = current.take() {
        terms.push(pending.finish()?);
    }
    Ok(terms)
}

fn parse_error(line: usize, message: String) -> TermsiftError {
    TermsiftError::OboParse { line, message }
}

fn strip_trailing_comment(value: &str) -> &str {
    value.split_once('!').map_or(value, |(head, _)| head).trim()
}

fn parse_quoted(value: &str) -> Option<String> {
    let mut chars = value.strip_prefix('"')?.chars();
    let mut out = String::new();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push(chars.next()?),
            '"' => return Some(out),
            other => out.push(other),
        }
    }
    None
}
