//! Fragua — recipe-based planning and execution for genomic index artifacts.
//!
//! Register artifacts and the recipes that derive them, provide whatever is
//! already on disk, and `make` the rest: a backtracking planner picks the
//! highest-priority satisfiable recipe for every target, a sequential
//! executor runs the plan in dependency order, and intermediate files are
//! swept away afterwards.

pub mod core;

pub use crate::core::artifact::{ArtifactState, ArtifactView, IndexArtifact};
pub use crate::core::config::IndexingParameters;
pub use crate::core::error::{
    CycleError, InsufficientInput, MakeError, RecipeError, RegistryError,
};
pub use crate::core::recipe::{IndexRecipe, RecipeFn};
pub use crate::core::registry::IndexRegistry;
