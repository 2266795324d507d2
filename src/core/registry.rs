//! Public surface of the index registry.
//!
//! A registry is populated once (`register_artifact`, `register_recipe`,
//! `provide`), configured (`set_output_prefix`, `set_keep_intermediates`),
//! and then asked to `make` targets as many times as needed. Callers
//! serialize access externally; nothing here is thread-safe.

use tempfile::TempDir;

use crate::core::artifact::IndexArtifact;
use crate::core::catalog::ArtifactCatalog;
use crate::core::config::IndexingParameters;
use crate::core::error::{CycleError, MakeError, RegistryError};
use crate::core::executor::{self, ExecContext};
use crate::core::order;
use crate::core::planner::{self, PlanStep};
use crate::core::recipe::{IndexRecipe, RecipeFn};
use crate::core::viz;

/// Registry of index artifacts, the recipes that derive them, and the
/// machinery to plan and execute builds.
pub struct IndexRegistry {
    catalog: ArtifactCatalog,
    params: IndexingParameters,
    output_prefix: String,
    keep_intermediates: bool,
    scratch: Option<TempDir>,
}

impl Default for IndexRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::with_params(IndexingParameters::default())
    }

    /// Build a registry around an immutable parameter record. Recipe
    /// closures capture whatever they need from it at registration time.
    pub fn with_params(params: IndexingParameters) -> Self {
        Self {
            catalog: ArtifactCatalog::new(),
            params,
            output_prefix: "index".to_string(),
            keep_intermediates: false,
            scratch: None,
        }
    }

    pub fn params(&self) -> &IndexingParameters {
        &self.params
    }

    /// Register an artifact under a unique identifier and filename suffix.
    pub fn register_artifact(&mut self, identifier: &str, suffix: &str) -> Result<(), RegistryError> {
        self.catalog.register(identifier, suffix)
    }

    /// Append a recipe deriving `identifier` from `input_identifiers`, all
    /// of which must already be registered. Registration order is priority:
    /// earlier recipes are preferred by the planner.
    pub fn register_recipe(
        &mut self,
        identifier: &str,
        input_identifiers: &[&str],
        exec: RecipeFn,
    ) -> Result<(), RegistryError> {
        for input in input_identifiers {
            if !self.catalog.contains(input) {
                return Err(RegistryError::UnknownIdentifier(input.to_string()));
            }
        }
        let inputs = input_identifiers.iter().map(|s| s.to_string()).collect();
        let artifact = self
            .catalog
            .get_mut(identifier)
            .ok_or_else(|| RegistryError::UnknownIdentifier(identifier.to_string()))?;
        artifact.add_recipe(IndexRecipe::new(inputs, exec));
        Ok(())
    }

    /// Mark an artifact as provided with the given files. Later calls
    /// overwrite; a provided artifact is never demoted.
    pub fn provide(&mut self, identifier: &str, filenames: &[&str]) -> Result<(), RegistryError> {
        let artifact = self
            .catalog
            .get_mut(identifier)
            .ok_or_else(|| RegistryError::UnknownIdentifier(identifier.to_string()))?;
        artifact.provide(filenames.iter().map(|s| s.to_string()).collect());
        Ok(())
    }

    /// Single-file convenience form of [`provide`](Self::provide).
    pub fn provide_file(&mut self, identifier: &str, filename: &str) -> Result<(), RegistryError> {
        self.provide(identifier, &[filename])
    }

    /// Identifiers of finished artifacts, in registration order.
    pub fn completed(&self) -> Vec<String> {
        self.catalog.finished_identifiers()
    }

    /// Prefix for files the user gets to keep (`<prefix>.<suffix>`).
    pub fn set_output_prefix(&mut self, prefix: &str) {
        self.output_prefix = prefix.to_string();
    }

    /// When set, intermediates are written at the output prefix and the
    /// reaper is skipped.
    pub fn set_keep_intermediates(&mut self, keep: bool) {
        self.keep_intermediates = keep;
    }

    /// Descriptor query by identifier.
    pub fn artifact(&self, identifier: &str) -> Option<&IndexArtifact> {
        self.catalog.get(identifier)
    }

    /// Topological order over the recipe-union graph.
    pub fn dependency_order(&self) -> Result<Vec<String>, CycleError> {
        order::dependency_order(&self.catalog)
    }

    /// Compute the plan for `targets` without executing it.
    pub fn plan(&self, targets: &[&str]) -> Result<Vec<PlanStep>, MakeError> {
        let targets: Vec<String> = targets.iter().map(|s| s.to_string()).collect();
        planner::make_plan(&self.catalog, &targets)
    }

    /// Plan and execute everything needed to finish `targets`, then clean up
    /// intermediate files unless they are being kept.
    ///
    /// On a recipe failure the error surfaces unchanged and artifacts built
    /// before the failure keep their state; the reaper only runs on success.
    pub fn make(&mut self, targets: &[&str]) -> Result<(), MakeError> {
        let targets: Vec<String> = targets.iter().map(|s| s.to_string()).collect();
        let plan = planner::make_plan(&self.catalog, &targets)?;

        if self.scratch.is_none() {
            self.scratch = Some(tempfile::tempdir().map_err(MakeError::Scratch)?);
        }
        let ctx = ExecContext {
            targets: &targets,
            output_prefix: &self.output_prefix,
            scratch_dir: self.scratch.as_ref().unwrap().path(),
            keep_intermediates: self.keep_intermediates,
            verbose: self.params.verbose,
        };
        executor::execute_plan(&mut self.catalog, &plan, &ctx)?;

        if !self.keep_intermediates {
            executor::reap_intermediates(&self.catalog, &targets);
        }
        Ok(())
    }

    /// Render the registry as a DOT graph, highlighting the plan for
    /// `targets` when any are given. An unplannable target set renders as a
    /// titled graph without highlighting; a cyclic registry is an error.
    pub fn to_dot(&self, targets: &[&str]) -> Result<String, MakeError> {
        viz::render(self, targets)
    }

    pub(crate) fn catalog(&self) -> &ArtifactCatalog {
        &self.catalog
    }
}
