//! DOT rendering of the registry with optional plan highlighting.
//!
//! Artifacts are boxes, recipes are circles labeled with their priority, and
//! edges run input → recipe → product. With targets given, the plan's nodes
//! and edges render bold and everything off-plan is muted; an unplannable
//! target set renders as a titled graph with no highlighting instead.

use std::collections::{HashMap, HashSet};

use crate::core::error::MakeError;
use crate::core::registry::IndexRegistry;

pub(crate) fn render(registry: &IndexRegistry, targets: &[&str]) -> Result<String, MakeError> {
    let catalog = registry.catalog();
    let mut out = String::from("digraph recipegraph {\n");

    let target_set: HashSet<&str> = targets.iter().copied().collect();
    let mut plan_steps: HashSet<(String, usize)> = HashSet::new();
    let mut plan_artifacts: HashSet<String> = HashSet::new();
    if !targets.is_empty() {
        match registry.plan(targets) {
            Ok(plan) => {
                for (identifier, priority) in plan {
                    plan_artifacts.insert(identifier.clone());
                    plan_steps.insert((identifier, priority));
                }
            }
            Err(MakeError::InsufficientInput(_)) => {
                out.push_str("labelloc=\"t\";\n");
                out.push_str("label=\"Insufficient input to create targets\";\n");
            }
            Err(err) => return Err(err),
        }
    }

    let mut dot_id: HashMap<&str, String> = HashMap::new();
    for (idx, artifact) in catalog.iter().enumerate() {
        let node = format!("I{}", idx);
        out.push_str(&format!(
            "{}[label=\"{}\" shape=box",
            node,
            artifact.identifier()
        ));
        if artifact.is_finished() {
            out.push_str(" style=\"filled,bold\" fillcolor=lightgray");
        } else if target_set.contains(artifact.identifier()) {
            out.push_str(" style=\"filled,bold\" fillcolor=lightblue");
        } else if plan_artifacts.contains(artifact.identifier()) {
            out.push_str(" style=bold");
        }
        out.push_str("];\n");
        dot_id.insert(artifact.identifier(), node);
    }

    let muted = if targets.is_empty() { "black" } else { "gray33" };
    let mut recipe_idx = 0usize;
    for artifact in catalog.iter() {
        for (priority, recipe) in artifact.recipes().iter().enumerate() {
            let node = format!("R{}", recipe_idx);
            recipe_idx += 1;
            let chosen = plan_steps.contains(&(artifact.identifier().to_string(), priority));
            if chosen {
                out.push_str(&format!("{}[label=\"{}\" shape=circle style=bold];\n", node, priority));
                out.push_str(&format!(
                    "{} -> {}[style=bold];\n",
                    node,
                    dot_id[artifact.identifier()]
                ));
            } else {
                out.push_str(&format!("{}[label=\"{}\" shape=circle];\n", node, priority));
                out.push_str(&format!(
                    "{} -> {} [color={}];\n",
                    node,
                    dot_id[artifact.identifier()],
                    muted
                ));
            }
            for input in recipe.inputs() {
                if chosen {
                    out.push_str(&format!("{} -> {}[style=bold];\n", dot_id[input.as_str()], node));
                } else {
                    out.push_str(&format!(
                        "{} -> {} [color={}];\n",
                        dot_id[input.as_str()],
                        node,
                        muted
                    ));
                }
            }
        }
    }
    out.push_str("}\n");
    Ok(out)
}
