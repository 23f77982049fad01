use crate::attributes::RawAttributes;
use crate::error::BemError;

use super::EntityParts;
use super::classify::{ClassContext, parse_entity};

/// Root BEM entity. Its name is used exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    parts: EntityParts,
}

impl Block {
    pub(crate) fn new(attrs: &RawAttributes, ctx: &ClassContext) -> Result<Self, BemError> {
        let parts = parse_entity(attrs, ctx)?.compose();
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &EntityParts {
        &self.parts
    }

    pub fn name(&self) -> &str {
        self.parts.name()
    }
}
