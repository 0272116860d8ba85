//! Deterministic text renderings of a graph snapshot.

use crate::domain::{graph::model::DependencyGraph, value_objects::EdgeKind};

enum Step {
    Enter {
        index: usize,
        prefix: String,
        connector: &'static str,
        child_prefix: String,
    },
    Leave(usize),
}

/// Render the graph as an ASCII tree.
///
/// Each root (a feature with no dependencies) starts a tree whose children
/// are its dependents. Every node is expanded once: a node already on the
/// current render path is printed as a `(circular reference)` leaf, and a
/// node expanded earlier under another parent as a `(see above)` leaf. Features that
/// no root reaches can only sit on dependency cycles; they are listed after
/// the trees.
pub fn visualize_ascii(graph: &DependencyGraph) -> String {
    if graph.is_empty() {
        return "(empty graph)\n".to_string();
    }

    let mut out = String::new();
    let mut reached = vec![false; graph.len()];
    let mut on_path = vec![false; graph.len()];

    for root in graph.root_indices() {
        let mut stack = vec![Step::Enter {
            index: root,
            prefix: String::new(),
            connector: "",
            child_prefix: String::new(),
        }];

        while let Some(step) = stack.pop() {
            let (index, prefix, connector, child_prefix) = match step {
                Step::Leave(index) => {
                    on_path[index] = false;
                    continue;
                }
                Step::Enter {
                    index,
                    prefix,
                    connector,
                    child_prefix,
                } => (index, prefix, connector, child_prefix),
            };

            let node = graph.node_at(index);
            if on_path[index] {
                out.push_str(&format!(
                    "{prefix}{connector}{} (circular reference)\n",
                    node.id
                ));
                continue;
            }

            if reached[index] {
                out.push_str(&format!("{prefix}{connector}{} (see above)\n", node.id));
                continue;
            }

            out.push_str(&format!(
                "{prefix}{connector}{} [L{}]\n",
                node.id, node.level
            ));
            reached[index] = true;
            on_path[index] = true;
            stack.push(Step::Leave(index));

            let children = graph.dependent_indices(index);
            for (position, &child) in children.iter().enumerate().rev() {
                let last = position + 1 == children.len();
                stack.push(Step::Enter {
                    index: child,
                    prefix: child_prefix.clone(),
                    connector: if last { "└── " } else { "├── " },
                    child_prefix: format!("{child_prefix}{}", if last { "    " } else { "│   " }),
                });
            }
        }
    }

    let unreached: Vec<&str> = graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(i, _)| !reached[*i])
        .map(|(_, n)| n.id.as_str())
        .collect();
    if !unreached.is_empty() {
        out.push_str(&format!(
            "(unreachable from any root, cyclic): {}\n",
            unreached.join(", ")
        ));
    }

    out
}

/// Summarise counts, roots, leaves, levels and unresolved references.
pub fn summarize_graph(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    let depends = graph.edges_of_kind(EdgeKind::Depends).count();
    let conflicts = graph.edges_of_kind(EdgeKind::Conflicts).count();

    out.push_str("Feature graph summary\n");
    out.push_str(&format!("  Features:         {}\n", graph.len()));
    out.push_str(&format!("  Dependency edges: {depends}\n"));
    out.push_str(&format!("  Conflict edges:   {conflicts}\n"));
    out.push_str(&format!("  Max depth:        {}\n", graph.max_level()));
    out.push_str(&format!("  Roots:  {}\n", list_or_none(graph.root_nodes())));
    out.push_str(&format!("  Leaves: {}\n", list_or_none(graph.leaf_nodes())));

    for level in 1..=graph.max_level() {
        let members: Vec<&str> = graph
            .nodes()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.id.as_str())
            .collect();
        out.push_str(&format!("  Level {level}: {}\n", members.join(", ")));
    }

    if !graph.unresolved().is_empty() {
        out.push_str(&format!(
            "  Unresolved references: {}\n",
            graph.unresolved().len()
        ));
        for reference in graph.unresolved() {
            out.push_str(&format!(
                "    - {} {} '{}' (not in catalog)\n",
                reference.from, reference.kind, reference.missing
            ));
        }
    }

    out
}

fn list_or_none(ids: &[String]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{Feature, FeatureCatalog},
        graph::GraphBuilder,
    };

    fn graph(specs: &[(&str, &[&str])]) -> DependencyGraph {
        let catalog = FeatureCatalog::new(
            specs
                .iter()
                .map(|(id, deps)| {
                    Feature::builder(*id)
                        .dependencies(deps.iter().copied())
                        .build()
                        .unwrap()
                })
                .collect(),
        )
        .unwrap();
        GraphBuilder::new(&catalog).build()
    }

    #[test]
    fn ascii_tree_layout() {
        let g = graph(&[("core", &[]), ("web", &["core"]), ("cli", &["core"]), ("api", &["web"])]);
        let expected = "\
core [L1]
├── web [L2]
│   └── api [L3]
└── cli [L2]
";
        assert_eq!(visualize_ascii(&g), expected);
    }

    #[test]
    fn ascii_is_deterministic() {
        let g = graph(&[("a", &[]), ("b", &["a"]), ("c", &["a", "b"])]);
        assert_eq!(visualize_ascii(&g), visualize_ascii(&g));
    }

    #[test]
    fn ascii_marks_cycles_below_a_root() {
        let g = graph(&[("root", &[]), ("b", &["root", "c"]), ("c", &["b"])]);
        let out = visualize_ascii(&g);
        assert!(out.contains("(circular reference)"));
    }

    #[test]
    fn ascii_expands_shared_dependents_once() {
        let g = graph(&[
            ("core", &[]),
            ("util", &[]),
            ("web", &["core", "util"]),
            ("api", &["web"]),
        ]);
        let expected = "\
core [L1]
└── web [L2]
    └── api [L3]
util [L1]
└── web (see above)
";
        assert_eq!(visualize_ascii(&g), expected);
    }

    #[test]
    fn ascii_output_is_linear_on_layered_dags() {
        // Every node depends on both nodes of the layer below.
        let layers = 30;
        let ids: Vec<[String; 2]> = (0..layers)
            .map(|l| [format!("n{l}a"), format!("n{l}b")])
            .collect();
        let features = ids
            .iter()
            .enumerate()
            .flat_map(|(l, pair)| {
                let below = if l == 0 { Vec::new() } else { ids[l - 1].to_vec() };
                pair.iter()
                    .map(move |id| Feature::builder(id.clone()).dependencies(below.clone()))
                    .map(|builder| builder.build().unwrap())
                    .collect::<Vec<_>>()
            })
            .collect();
        let g = GraphBuilder::new(&FeatureCatalog::new(features).unwrap()).build();

        let out = visualize_ascii(&g);
        let expanded = out.lines().filter(|l| l.contains("[L")).count();
        assert_eq!(expanded, 2 * layers);
        // one line per edge at most, plus the roots
        assert!(out.lines().count() <= 4 * layers);
    }

    #[test]
    fn ascii_lists_pure_cycles() {
        let g = graph(&[("a", &["b"]), ("b", &["a"])]);
        let out = visualize_ascii(&g);
        assert!(out.contains("cyclic): a, b"));
    }

    #[test]
    fn summary_counts() {
        let g = graph(&[("a", &[]), ("b", &["a", "ghost"])]);
        let out = summarize_graph(&g);
        assert!(out.contains("Features:         2"));
        assert!(out.contains("Dependency edges: 1"));
        assert!(out.contains("Level 2: b"));
        assert!(out.contains("'ghost'"));
    }
}
