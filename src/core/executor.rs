//! Plan execution and intermediate cleanup.
//!
//! Steps run strictly in plan order. End products (targets of the current
//! `make` and directly-provided artifacts) are written at the configured
//! output prefix; everything else goes into the scratch directory under a
//! BLAKE3-derived name and is deleted by the reaper once the run succeeds.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::artifact::{ArtifactView, IndexArtifact};
use crate::core::catalog::ArtifactCatalog;
use crate::core::error::MakeError;
use crate::core::hasher;
use crate::core::planner::PlanStep;

/// Execution settings for one `make` call.
pub(crate) struct ExecContext<'a> {
    pub targets: &'a [String],
    pub output_prefix: &'a str,
    pub scratch_dir: &'a Path,
    pub keep_intermediates: bool,
    pub verbose: bool,
}

/// An artifact is intermediate when it is neither provided directly nor a
/// target of the current `make`.
fn is_intermediate(artifact: &IndexArtifact, targets: &[String]) -> bool {
    !artifact.was_provided_directly()
        && !targets.iter().any(|target| target == artifact.identifier())
}

/// Run the plan in order, recording each step's output filenames on its
/// artifact. A failing recipe aborts the run; artifacts built before the
/// failure keep their state.
pub(crate) fn execute_plan(
    catalog: &mut ArtifactCatalog,
    plan: &[PlanStep],
    ctx: &ExecContext,
) -> Result<(), MakeError> {
    for (identifier, priority) in plan {
        let filenames = {
            let artifact = catalog.get(identifier).unwrap();

            // aliasing recipes may ignore the prefix entirely
            let prefix = if ctx.keep_intermediates || !is_intermediate(artifact, ctx.targets) {
                ctx.output_prefix.to_string()
            } else {
                format!(
                    "{}/{}",
                    ctx.scratch_dir.display(),
                    hasher::hash_identifier(identifier)
                )
            };

            let recipe = &artifact.recipes()[*priority];
            let inputs: Vec<ArtifactView> = recipe
                .inputs()
                .iter()
                .map(|input| {
                    let input_artifact = catalog.get(input).unwrap();
                    assert!(
                        input_artifact.is_finished(),
                        "input {} of {} is not finished",
                        input,
                        identifier
                    );
                    input_artifact.view()
                })
                .collect();

            if ctx.verbose {
                eprintln!(
                    "[fragua] building {} with recipe {}",
                    identifier, priority
                );
            }

            recipe.execute(&inputs, &prefix, artifact.suffix())?
        };
        catalog.get_mut(identifier).unwrap().record_built(filenames);
    }
    Ok(())
}

/// Delete every file owned only by intermediate artifacts. Files an alias
/// recipe shares with a non-intermediate survive; deletion failures are
/// ignored.
pub(crate) fn reap_intermediates(catalog: &ArtifactCatalog, targets: &[String]) {
    let mut keep: HashSet<&str> = HashSet::new();
    for artifact in catalog.iter() {
        if !is_intermediate(artifact, targets) {
            keep.extend(artifact.filenames().iter().map(String::as_str));
        }
    }
    for artifact in catalog.iter() {
        for filename in artifact.filenames() {
            if !keep.contains(filename.as_str()) {
                let _ = fs::remove_file(filename);
            }
        }
    }
}
