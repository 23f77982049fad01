//! Entity creation and the stack of open entities.
//!
//! The template layer creates an entity when it enters a block/element mixin
//! and drops it once everything nested inside has been created and dropped:
//!
//! ```text
//! mixin b
//!   - const b = bem.create('block', attributes)
//!   #{b.tag}&attributes(b.attributes)
//!     block            <- nested entities see `b` on the stack
//!   - bem.dropEntity() <- mandatory once the nested block is done
//! ```
//!
//! Elements take the nearest open block as their owner, and `_N-name` classes
//! reach the Nth open block. Lookups are only correct while creates and drops
//! stay balanced; the factory does not check this.

use std::io;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::rc::Rc;

use crate::attributes::RawAttributes;
use crate::config::{self, Options, OptionsBag};
use crate::entity::classify::ClassContext;
use crate::entity::{Block, Element, Entity, EntityKind};
use crate::error::BemError;

pub(crate) mod stack;

use stack::EntityStack;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug)]
pub struct Factory {
    options: Options,
    stack: EntityStack,
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl Factory {
    pub fn new() -> Self {
        Self::from_options(Options::default())
    }

    /// Factory with a partial override of the default options.
    pub fn with_options(bag: OptionsBag) -> Self {
        Self::from_options(Options::from(bag))
    }

    pub fn from_options(options: Options) -> Self {
        #[cfg(debug_assertions)]
        {
            init_logger();
        }

        log::debug!(
            "New factory with element separator '{}', modifier separator '{}'",
            options.separators.element,
            options.separators.modifier
        );

        Self {
            options,
            stack: EntityStack::new(),
        }
    }

    /// Factory configured from a config file, found as [`config::load`] does.
    ///
    /// A config file that exists but cannot be read or parsed is an error.
    pub fn from_config(explicit: Option<&Path>, start_dir: &Path) -> io::Result<Self> {
        let (options, path) = config::load(explicit, start_dir)?;
        if let Some(path) = path {
            log::debug!("Factory options come from {}", path.display());
        }
        Ok(Self::from_options(options))
    }

    /// Independent copy of the options in use.
    pub fn options(&self) -> Options {
        self.options.clone()
    }

    /// Create an entity from a kind name (`"block"` or `"element"`) and push it.
    pub fn create(&mut self, kind: &str, attrs: RawAttributes) -> Result<Entity, BemError> {
        let kind = kind.parse::<EntityKind>()?;
        self.create_kind(kind, attrs)
    }

    pub fn create_kind(&mut self, kind: EntityKind, attrs: RawAttributes) -> Result<Entity, BemError> {
        let ctx = ClassContext {
            separators: &self.options.separators,
            stack: &self.stack,
        };

        let entity: Entity = match kind {
            EntityKind::Block => Block::new(&attrs, &ctx)?.into(),
            EntityKind::Element => {
                let block = self
                    .stack
                    .block(1)
                    .cloned()
                    .ok_or(BemError::NoEnclosingBlock)?;
                Element::new(block, &attrs, &ctx)?.into()
            }
        };

        log::debug!(
            "Created {} '{}' at depth {}",
            entity.kind(),
            entity.name(),
            self.stack.depth() + 1
        );

        self.stack.push(entity.clone());
        Ok(entity)
    }

    /// Create and push an entity, dropping it again when the returned scope ends.
    ///
    /// Nested entities are created through the scope, which keeps creates and
    /// drops balanced.
    pub fn enter(&mut self, kind: &str, attrs: RawAttributes) -> Result<Scope<'_>, BemError> {
        let entity = self.create(kind, attrs)?;
        Ok(Scope {
            factory: self,
            entity,
        })
    }

    /// Entity `depth` positions from the top of the stack (1 = innermost).
    pub fn get_entity(&self, depth: usize) -> Option<&Entity> {
        self.stack.entity(depth)
    }

    /// The `nth` open block counting from the top, elements not counted.
    pub fn get_block(&self, nth: usize) -> Option<&Rc<Block>> {
        self.stack.block(nth)
    }

    pub fn current_entity(&self) -> Option<&Entity> {
        self.get_entity(1)
    }

    pub fn current_block(&self) -> Option<&Rc<Block>> {
        self.get_block(1)
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Pop the innermost entity once its nested content is done.
    pub fn drop_entity(&mut self) -> Option<Entity> {
        let dropped = self.stack.pop();
        match &dropped {
            Some(entity) => log::debug!("Dropped {} '{}'", entity.kind(), entity.name()),
            None => log::warn!("drop_entity called on an empty stack"),
        }
        dropped
    }

    /// Forget every open entity, e.g. between independent renders.
    pub fn reset(&mut self) {
        log::debug!("Resetting factory stack at depth {}", self.stack.depth());
        self.stack.clear();
    }
}

/// An entity that stays open until the scope is dropped.
pub struct Scope<'f> {
    factory: &'f mut Factory,
    entity: Entity,
}

impl Scope<'_> {
    pub fn entity(&self) -> &Entity {
        &self.entity
    }
}

impl Deref for Scope<'_> {
    type Target = Factory;

    fn deref(&self) -> &Factory {
        self.factory
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Factory {
        self.factory
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        match self.factory.drop_entity() {
            Some(dropped) if dropped.ptr_eq(&self.entity) => {}
            Some(dropped) => log::warn!(
                "Scope for '{}' dropped '{}' instead; stack is unbalanced",
                self.entity.name(),
                dropped.name()
            ),
            None => {}
        }
    }
}
