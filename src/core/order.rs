//! Topological ordering over the union of all recipe edges.
//!
//! Every recipe of artifact A taking input B contributes an edge B→A; the
//! order places producers before consumers. Kahn's algorithm over the
//! deduplicated edge set, with a stack of ready nodes seeded in registration
//! order, so the result is deterministic for a deterministic registration
//! sequence.

use std::collections::HashMap;

use crate::core::catalog::ArtifactCatalog;
use crate::core::error::CycleError;

/// Total order of identifiers consistent with the recipe-union DAG, or a
/// [`CycleError`] naming the identifiers trapped on cycles.
pub fn dependency_order(catalog: &ArtifactCatalog) -> Result<Vec<String>, CycleError> {
    let labels: Vec<&str> = catalog.identifiers().collect();
    let index_of: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();

    // successors[b] = producers that consume artifact b through some recipe
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); labels.len()];
    for (producer_idx, artifact) in catalog.iter().enumerate() {
        for recipe in artifact.recipes() {
            for input in recipe.inputs() {
                successors[index_of[input.as_str()]].push(producer_idx);
            }
        }
    }
    for adjacent in &mut successors {
        adjacent.sort_unstable();
        adjacent.dedup();
    }

    let mut in_degree = vec![0usize; labels.len()];
    for adjacent in &successors {
        for &succ in adjacent {
            in_degree[succ] += 1;
        }
    }

    let mut stack: Vec<usize> = (0..labels.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(labels.len());
    while let Some(node) = stack.pop() {
        order.push(node);
        for &succ in &successors[node] {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                stack.push(succ);
            }
        }
    }

    if order.len() != labels.len() {
        let members = (0..labels.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| labels[i].to_string())
            .collect();
        return Err(CycleError { members });
    }

    Ok(order.into_iter().map(|i| labels[i].to_string()).collect())
}
