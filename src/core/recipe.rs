//! Recipes — one way to derive an artifact from a tuple of input artifacts.

use crate::core::artifact::ArtifactView;
use crate::core::error::RecipeError;

/// Callback signature for recipe execution: input views in recipe order, the
/// chosen output prefix, and the owning artifact's suffix. Returns the
/// filenames it produced (or aliased).
pub type RecipeFn = Box<dyn Fn(&[ArtifactView], &str, &str) -> Result<Vec<String>, RecipeError>>;

/// One way to produce an artifact. Its position in the owning artifact's
/// recipe list is its priority (0 = preferred).
///
/// Inputs are identifiers, not catalog references; the executor resolves
/// them to [`ArtifactView`] snapshots at invocation time. Duplicates are
/// allowed and input order is significant to the callback.
pub struct IndexRecipe {
    inputs: Vec<String>,
    exec: RecipeFn,
}

impl IndexRecipe {
    pub(crate) fn new(inputs: Vec<String>, exec: RecipeFn) -> Self {
        Self { inputs, exec }
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub(crate) fn execute(
        &self,
        inputs: &[ArtifactView],
        prefix: &str,
        suffix: &str,
    ) -> Result<Vec<String>, RecipeError> {
        (self.exec)(inputs, prefix, suffix)
    }
}
