use std::rc::Rc;

use crate::entity::{Block, Entity};

/// Entities that are still open, innermost last.
#[derive(Debug, Default)]
pub(crate) struct EntityStack {
    stack: Vec<Entity>,
}

impl EntityStack {
    pub(crate) fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn push(&mut self, entity: Entity) {
        self.stack.push(entity);
    }

    pub(crate) fn pop(&mut self) -> Option<Entity> {
        self.stack.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.stack.clear();
    }

    /// Entity `depth` positions from the top (1 = top). Depth 0 is never found.
    pub(crate) fn entity(&self, depth: usize) -> Option<&Entity> {
        if depth == 0 {
            return None;
        }
        let index = self.stack.len().checked_sub(depth)?;
        self.stack.get(index)
    }

    /// The `nth` block from the top, skipping elements (1 = nearest block).
    pub(crate) fn block(&self, nth: usize) -> Option<&Rc<Block>> {
        let skip = nth.checked_sub(1)?;
        self.stack
            .iter()
            .rev()
            .filter_map(Entity::as_block)
            .nth(skip)
    }
}
