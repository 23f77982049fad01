use std::rc::Rc;

use crate::attributes::RawAttributes;
use crate::error::BemError;

use super::classify::{ClassContext, parse_entity};
use super::{Block, EntityParts};

/// Entity scoped to its owning block: `Block__item`, `Block__item--active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    block: Rc<Block>,
    parts: EntityParts,
}

impl Element {
    pub(crate) fn new(
        block: Rc<Block>,
        attrs: &RawAttributes,
        ctx: &ClassContext,
    ) -> Result<Self, BemError> {
        let mut draft = parse_entity(attrs, ctx)?;

        // Nth-block elements and rest classes are already fully qualified.
        let prefix = format!("{}{}", block.name(), ctx.separators.element);
        draft.name = format!("{}{}", prefix, draft.name);
        draft.modifiers = draft
            .modifiers
            .into_iter()
            .map(|modifier| format!("{}{}", prefix, modifier))
            .collect();

        Ok(Self {
            block,
            parts: draft.compose(),
        })
    }

    /// The block this element belongs to.
    pub fn block(&self) -> &Rc<Block> {
        &self.block
    }

    pub fn parts(&self) -> &EntityParts {
        &self.parts
    }

    pub fn name(&self) -> &str {
        self.parts.name()
    }
}
