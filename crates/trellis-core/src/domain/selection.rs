//! Validation of a feature selection before removal or installation.
//!
//! Every rule runs; findings accumulate into one [`SelectionValidation`]
//! instead of stopping at the first problem.

use std::{collections::HashSet, fmt};

use serde::Serialize;

use crate::domain::{
    compatibility::conflict_issue,
    entities::{Feature, FeatureCatalog},
    graph::{DependencyGraph, GraphBuilder, TraversalEngine},
    value_objects::CanonicalKey,
};

/// Machine-readable error codes, serialized in SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionErrorCode {
    Missing,
    Invalid,
    Incompatible,
    CircularDependency,
    ProblematicDependencyChain,
}

impl SelectionErrorCode {
    pub const ALL: [Self; 5] = [
        Self::Missing,
        Self::Invalid,
        Self::Incompatible,
        Self::CircularDependency,
        Self::ProblematicDependencyChain,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "MISSING",
            Self::Invalid => "INVALID",
            Self::Incompatible => "INCOMPATIBLE",
            Self::CircularDependency => "CIRCULAR_DEPENDENCY",
            Self::ProblematicDependencyChain => "PROBLEMATIC_DEPENDENCY_CHAIN",
        }
    }

    /// Canned remediation hint for this code.
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::Missing => "Check the requested ids against the catalog; unknown ids cannot be changed",
            Self::Invalid => "Drop non-removable features from the selection",
            Self::Incompatible => "Select at most one feature from each conflicting pair",
            Self::CircularDependency => "Break the dependency cycle in the catalog before changing these features",
            Self::ProblematicDependencyChain => {
                "Add the listed transitive dependencies to the selection or keep the dependent features"
            }
        }
    }
}

impl fmt::Display for SelectionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionWarningCode {
    UnmetDependency,
    UnmetPeer,
}

impl SelectionWarningCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnmetDependency => "UNMET_DEPENDENCY",
            Self::UnmetPeer => "UNMET_PEER",
        }
    }
}

impl fmt::Display for SelectionWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionError {
    pub code: SelectionErrorCode,
    pub features: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionWarning {
    pub code: SelectionWarningCode,
    pub feature: String,
    pub related: Vec<String>,
    pub message: String,
}

/// Accumulated findings for one canonical selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionValidation {
    pub features: Vec<String>,
    pub valid: bool,
    pub errors: Vec<SelectionError>,
    pub warnings: Vec<SelectionWarning>,
    pub suggestions: Vec<String>,
}

impl SelectionValidation {
    pub fn has_error(&self, code: SelectionErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    pub fn has_warning(&self, code: SelectionWarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    pub fn errors_with(&self, code: SelectionErrorCode) -> impl Iterator<Item = &SelectionError> {
        self.errors.iter().filter(move |e| e.code == code)
    }
}

/// Validate a canonical selection against the catalog.
pub fn validate_selection(catalog: &FeatureCatalog, key: &CanonicalKey) -> SelectionValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if key.is_empty() {
        errors.push(SelectionError {
            code: SelectionErrorCode::Missing,
            features: Vec::new(),
            message: "No features selected".to_string(),
        });
    }

    let mut known: Vec<&Feature> = Vec::with_capacity(key.ids().len());
    for id in key.ids() {
        match catalog.get(id) {
            Some(feature) => known.push(feature),
            None => errors.push(SelectionError {
                code: SelectionErrorCode::Missing,
                features: vec![id.clone()],
                message: format!("Feature '{id}' does not exist"),
            }),
        }
    }

    for feature in known.iter().filter(|f| !f.is_removable()) {
        errors.push(SelectionError {
            code: SelectionErrorCode::Invalid,
            features: vec![feature.id().to_string()],
            message: format!("Feature '{}' is not removable", feature.id()),
        });
    }

    for (i, a) in known.iter().enumerate() {
        for b in &known[i + 1..] {
            if let Some(issue) = conflict_issue(a, b) {
                errors.push(SelectionError {
                    code: SelectionErrorCode::Incompatible,
                    features: vec![issue.from, issue.to],
                    message: issue.message,
                });
            }
        }
    }

    let graph = GraphBuilder::new(catalog).build();
    let starts: Vec<usize> = known.iter().filter_map(|f| graph.index_of(f.id())).collect();
    for cycle in find_cycles(&graph, &starts) {
        let mut path = cycle.clone();
        if let Some(first) = cycle.first() {
            path.push(first.clone());
        }
        errors.push(SelectionError {
            code: SelectionErrorCode::CircularDependency,
            message: format!("Circular dependency: {}", path.join(" → ")),
            features: cycle,
        });
    }

    let engine = TraversalEngine::new(&graph);
    for feature in &known {
        let Ok(closure) = engine.transitive_dependencies(feature.id()) else {
            continue;
        };
        let outside: Vec<String> = closure
            .into_iter()
            .filter(|id| id != feature.id() && !key.contains(id))
            .collect();
        if outside.is_empty() {
            continue;
        }
        let mut features = vec![feature.id().to_string()];
        features.extend(outside.iter().cloned());
        errors.push(SelectionError {
            code: SelectionErrorCode::ProblematicDependencyChain,
            message: format!(
                "'{}' transitively depends on features outside the selection: {}",
                feature.id(),
                outside.join(", ")
            ),
            features,
        });
    }

    for feature in &known {
        for dep in feature.dependencies() {
            if key.contains(dep) {
                continue;
            }
            let message = if catalog.contains(dep) {
                format!("'{}' depends on '{dep}', which is not selected", feature.id())
            } else {
                format!("'{}' depends on '{dep}', which is not in the catalog", feature.id())
            };
            warnings.push(SelectionWarning {
                code: SelectionWarningCode::UnmetDependency,
                feature: feature.id().to_string(),
                related: vec![dep.clone()],
                message,
            });
        }

        let peers: Vec<String> = catalog
            .iter()
            .filter(|other| other.id() != feature.id() && !key.contains(other.id()))
            .filter(|other| {
                other
                    .dependencies()
                    .iter()
                    .any(|d| feature.dependencies().contains(d))
            })
            .map(|other| other.id().to_string())
            .collect();
        if !peers.is_empty() {
            warnings.push(SelectionWarning {
                code: SelectionWarningCode::UnmetPeer,
                feature: feature.id().to_string(),
                message: format!(
                    "'{}' shares dependencies with unselected features: {}",
                    feature.id(),
                    peers.join(", ")
                ),
                related: peers,
            });
        }
    }

    let mut suggestions: Vec<String> = SelectionErrorCode::ALL
        .iter()
        .filter(|code| errors.iter().any(|e| e.code == **code))
        .map(|code| code.suggestion().to_string())
        .collect();
    suggestions.push("Run a compatibility check for pairwise details".to_string());
    suggestions.push("Run an impact analysis before applying the change".to_string());

    SelectionValidation {
        features: key.ids().to_vec(),
        valid: errors.is_empty(),
        errors,
        warnings,
        suggestions,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Three-color DFS over resolved dependency edges, starting from `starts`.
///
/// Each cycle is reported once, as its member ids in path order rotated to
/// begin at the lowest arena index.
fn find_cycles(graph: &DependencyGraph, starts: &[usize]) -> Vec<Vec<String>> {
    let mut color = vec![Color::White; graph.len()];
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut cycles = Vec::new();

    for &start in starts {
        if color[start] != Color::White {
            continue;
        }
        color[start] = Color::Gray;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let Some(&next) = graph.dependency_indices(node).get(cursor) else {
                color[node] = Color::Black;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match color[next] {
                Color::White => {
                    color[next] = Color::Gray;
                    stack.push((next, 0));
                }
                Color::Gray => {
                    let Some(pos) = stack.iter().position(|&(i, _)| i == next) else {
                        continue;
                    };
                    let mut members: Vec<usize> = stack[pos..].iter().map(|&(i, _)| i).collect();
                    if let Some(min_at) = members
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, i)| **i)
                        .map(|(at, _)| at)
                    {
                        members.rotate_left(min_at);
                    }
                    if seen.insert(members.clone()) {
                        cycles.push(
                            members
                                .iter()
                                .map(|&i| graph.node_at(i).id.clone())
                                .collect(),
                        );
                    }
                }
                Color::Black => {}
            }
        }
    }

    cycles
}
