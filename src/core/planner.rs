//! Backtracking search over recipe choices.
//!
//! For each target the planner walks the dependency graph from the product
//! side, always trying the highest-priority recipe first. A recipe choice can
//! dead-end when some transitive input has no recipes and was never provided;
//! the search then unwinds to the nearest requester with an untried recipe
//! and moves on to its next one. Choices made for earlier targets are shared
//! with later ones, so common subplans appear once in the final plan.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::core::artifact::IndexArtifact;
use crate::core::catalog::ArtifactCatalog;
use crate::core::error::{InsufficientInput, MakeError, RegistryError};
use crate::core::order;
use crate::core::recipe::IndexRecipe;

/// One step of a build plan: an artifact identifier plus the priority of the
/// recipe chosen for it.
pub type PlanStep = (String, usize);

/// Pending work, keyed by dependency position and popped latest-position
/// first, so a producer's recipe choice is settled before any of its
/// consumers has to be revisited. The value tracks the position of the
/// earliest frame that requested the artifact and how many requests are
/// outstanding.
type Queue = BTreeMap<usize, (usize, usize)>;

/// One element of the search path.
struct Frame {
    /// Dependency position of the artifact this frame resolves.
    position: usize,
    /// Position of the frame that enqueued it; the sentinel value
    /// `identifier count` stands for the plan target itself.
    requester: usize,
    /// Recipe currently being tried; equal to the artifact's recipe count
    /// once every choice is exhausted.
    recipe: usize,
}

/// Compute the dependency-ordered steps needed to finish every target,
/// omitting artifacts that are already finished.
pub fn make_plan(catalog: &ArtifactCatalog, targets: &[String]) -> Result<Vec<PlanStep>, MakeError> {
    for target in targets {
        if !catalog.contains(target) {
            return Err(RegistryError::UnknownIdentifier(target.clone()).into());
        }
    }
    let planner = Planner::new(catalog)?;
    planner.plan(targets)
}

struct Planner<'a> {
    catalog: &'a ArtifactCatalog,
    identifier_order: Vec<String>,
    position_of: HashMap<String, usize>,
}

impl<'a> Planner<'a> {
    fn new(catalog: &'a ArtifactCatalog) -> Result<Self, MakeError> {
        let identifier_order = order::dependency_order(catalog)?;
        let position_of = identifier_order
            .iter()
            .enumerate()
            .map(|(position, identifier)| (identifier.clone(), position))
            .collect();
        Ok(Self {
            catalog,
            identifier_order,
            position_of,
        })
    }

    fn artifact(&self, position: usize) -> &IndexArtifact {
        self.catalog.get(&self.identifier_order[position]).unwrap()
    }

    fn position(&self, identifier: &str) -> usize {
        self.position_of[identifier]
    }

    fn plan(&self, targets: &[String]) -> Result<Vec<PlanStep>, MakeError> {
        let mut chosen: HashSet<(usize, usize)> = HashSet::new();
        for target in targets {
            self.search(target, &mut chosen)?;
        }

        let mut steps: Vec<(usize, usize)> = chosen.into_iter().collect();
        steps.sort_unstable();
        Ok(steps
            .into_iter()
            .filter(|&(position, _)| !self.artifact(position).is_finished())
            .map(|(position, recipe)| (self.identifier_order[position].clone(), recipe))
            .collect())
    }

    /// Resolve one target, adding its `(position, recipe)` choices to the
    /// shared set.
    fn search(
        &self,
        target: &str,
        chosen: &mut HashSet<(usize, usize)>,
    ) -> Result<(), InsufficientInput> {
        let sentinel = self.identifier_order.len();
        let mut queue: Queue = BTreeMap::new();
        let mut path: Vec<Frame> = Vec::new();
        queue.insert(self.position(target), (sentinel, 1));

        while let Some((position, (requester, _))) = queue.pop_last() {
            path.push(Frame {
                position,
                requester,
                recipe: 0,
            });
            let artifact = self.artifact(position);
            if artifact.is_finished() {
                // provided or already built, nothing to derive
            } else if let Some(preferred) = artifact.recipes().first() {
                self.enqueue_inputs(&mut queue, preferred, position);
            } else {
                self.backtrack(&mut queue, &mut path);
            }
        }

        if path.is_empty() {
            return Err(InsufficientInput {
                target: target.to_string(),
                finished: self.catalog.finished_identifiers(),
            });
        }
        for frame in path {
            chosen.insert((frame.position, frame.recipe));
        }
        Ok(())
    }

    /// Unwind the path after a dead end.
    ///
    /// While the newest frame has no recipe left to try (a frame with zero
    /// recipes is exhausted immediately), abandon frames down to its
    /// requester, undoing every abandoned frame's queue contributions; the
    /// requester then retires its current recipe and advances to the next
    /// one, whose inputs are enqueued. Leaves the path empty when every
    /// alternative above the dead end is exhausted.
    fn backtrack(&self, queue: &mut Queue, path: &mut Vec<Frame>) {
        while let Some(frame) = path.last() {
            if frame.recipe < self.artifact(frame.position).recipes().len() {
                break;
            }
            let requester = frame.requester;

            while let Some(abandoned) = path.last() {
                if abandoned.position == requester {
                    break;
                }
                self.undo_enqueues(queue, abandoned.position, abandoned.recipe);
                path.pop();
            }

            if let Some(frame) = path.last_mut() {
                let position = frame.position;
                let retired = frame.recipe;
                frame.recipe += 1;
                self.undo_enqueues(queue, position, retired);
            }
        }

        if let Some(frame) = path.last() {
            let next = &self.artifact(frame.position).recipes()[frame.recipe];
            self.enqueue_inputs(queue, next, frame.position);
        }
    }

    /// Request every input of `recipe` on behalf of the frame at
    /// `requester`. Duplicate inputs count as distinct requests.
    fn enqueue_inputs(&self, queue: &mut Queue, recipe: &IndexRecipe, requester: usize) {
        for input in recipe.inputs() {
            let position = self.position(input);
            queue
                .entry(position)
                .and_modify(|(_, count)| *count += 1)
                .or_insert((requester, 1));
        }
    }

    /// Withdraw the requests a frame made when it enqueued `recipe_idx`'s
    /// inputs. Frames that never chose a recipe (finished artifacts,
    /// exhausted frames) contribute nothing and are skipped. Entries already
    /// dequeued are gone from the queue and need no adjustment.
    fn undo_enqueues(&self, queue: &mut Queue, position: usize, recipe_idx: usize) {
        let artifact = self.artifact(position);
        if artifact.is_finished() || recipe_idx >= artifact.recipes().len() {
            return;
        }
        for input in artifact.recipes()[recipe_idx].inputs() {
            let input_position = self.position(input);
            if let Some((_, count)) = queue.get_mut(&input_position) {
                *count -= 1;
                if *count == 0 {
                    queue.remove(&input_position);
                }
            }
        }
    }
}
