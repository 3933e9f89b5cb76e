use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, TermsiftError};

use super::parse::{OboTerm, parse_obo};
use super::{HIERARCHY_RELATIONS, OntologyGraph, Relation};

#[derive(Debug, Clone, Default)]
struct TermNode {
    name: Option<String>,
    synonyms: Vec<String>,
    parents: Vec<(Relation, String)>,
}

/// In-memory ontology graph merged from one or more OBO files.
///
/// Edges pointing at ids that no loaded file defines are dropped, so every
/// id returned by a traversal can also be resolved.
#[derive(Debug, Clone, Default)]
pub struct OboOntology {
    terms: HashMap<String, TermNode>,
    children: HashMap<String, Vec<(Relation, String)>>,
}

impl OboOntology {
    pub fn parse(text: &str) -> Result<Self> {
        let mut ontology = Self::default();
        ontology.merge_terms(parse_obo(text)?);
        ontology.rebuild_edges();
        Ok(ontology)
    }

    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut ontology = Self::default();
        for path in paths {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path)?;
            let terms = parse_obo(&text)?;
            info!(path = %path.display(), terms = terms.len(), "loaded obo file");
            ontology.merge_terms(terms);
        }
        ontology.rebuild_edges();
        Ok(ontology)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.terms.contains_key(id)
    }

    fn merge_terms(&mut self, terms: Vec<OboTerm>) {
        for term in terms {
            let node = self.terms.entry(term.id).or_default();
            if node.name.is_none() {
                node.name = term.name;
            }
            for synonym in term.synonyms {
                if !node.synonyms.contains(&synonym) {
                    node.synonyms.push(synonym);
                }
            }
            if term.obsolete {
                continue;
            }
            for parent in term.parents {
                if !node.parents.contains(&parent) {
                    node.parents.push(parent);
                }
            }
        }
    }

    fn rebuild_edges(&mut self) {
        let known = self.terms.keys().cloned().collect::<HashSet<_>>();
        let mut dropped = 0usize;
        for node in self.terms.values_mut() {
            let before = node.parents.len();
            node.parents.retain(|(_, parent)| known.contains(parent));
            dropped += before - node.parents.len();
        }
        self.children.clear();
        for (child, node) in &self.terms {
            for (relation, parent) in &node.parents {
                self.children
                    .entry(parent.clone())
                    .or_default()
                    .push((relation.clone(), child.clone()));
            }
        }
        if dropped > 0 {
            debug!(dropped, "dropped edges to undefined ontology terms");
        }
    }

    fn node(&self, id: &str) -> Result<&TermNode> {
        self.terms
            .get(id)
            .ok_or_else(|| TermsiftError::UnknownTerm(id.to_string()))
    }

    fn walk(
        &self,
        id: &str,
        relations: &[Relation],
        max_depth: Option<usize>,
        direction: Direction,
    ) -> Result<BTreeSet<String>> {
        self.node(id)?;
        let mut visited = HashSet::from([id.to_string()]);
        let mut queue = VecDeque::from([(id.to_string(), 0usize)]);
        let mut out = BTreeSet::new();

        while let Some((current, depth)) = queue.pop_front() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            for next in self.neighbors(&current, relations, direction) {
                if visited.insert(next.to_string()) {
                    out.insert(next.to_string());
                    queue.push_back((next.to_string(), depth + 1));
                }
            }
        }
        Ok(out)
    }

    fn neighbors<'a>(
        &'a self,
        id: &str,
        relations: &'a [Relation],
        direction: Direction,
    ) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        let edges = match direction {
            Direction::Up => self.terms.get(id).map(|node| node.parents.as_slice()),
            Direction::Down => self.children.get(id).map(Vec::as_slice),
        };
        Box::new(
            edges
                .unwrap_or_default()
                .iter()
                .filter(move |(relation, _)| relations.contains(relation))
                .map(|(_, target)| target.as_str()),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl OntologyGraph for OboOntology {
    fn resolve_name(&self, id: &str) -> Result<String> {
        let node = self.node(id)?;
        Ok(node.name.clone().unwrap_or_else(|| id.to_string()))
    }

    fn synonyms(&self, id: &str) -> Result<Vec<String>> {
        Ok(self.node(id)?.synonyms.clone())
    }

    fn ancestors_within_radius(&self, id: &str, radius: usize) -> Result<BTreeSet<String>> {
        self.walk(id, &HIERARCHY_RELATIONS, Some(radius), Direction::Up)
    }

    fn descendants_within_radius(&self, id: &str, radius: usize) -> Result<BTreeSet<String>> {
        self.walk(id, &HIERARCHY_RELATIONS, Some(radius), Direction::Down)
    }

    fn closure(&self, id: &str, relations: &[Relation]) -> Result<BTreeSet<String>> {
        let mut out = self.walk(id, relations, None, Direction::Up)?;
        out.insert(id.to_string());
        Ok(out)
    }
}
