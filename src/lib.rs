//! Expands compact BEM class queries into fully-qualified class attributes.
//!
//! ```text
//! UL Menu_main         -> <ul class="Menu Menu--main">
//!   item _active       ->   <li class="Menu__item Menu__item--active">
//! ```

pub mod attributes;
pub mod config;
pub mod entity;
pub mod error;
pub mod factory;

pub use attributes::{ClassValue, RawAttributes};
pub use config::Options;
pub use config::OptionsBag;
pub use config::OptionsBuilder;
pub use config::Separators;
pub use entity::{Block, Element, Entity, EntityKind, EntityObject};
pub use error::BemError;
pub use factory::{Factory, Scope};

/// Expands a standalone block class query with default options.
///
/// # Examples
///
/// ```rust
/// let class = bemify::expand_block_class("NAV Menu_dark js-menu").unwrap();
/// assert_eq!(class, "Menu Menu--dark js-menu");
/// ```
pub fn expand_block_class(class: &str) -> Result<String, BemError> {
    let mut factory = Factory::new();
    let block = factory.create_kind(EntityKind::Block, RawAttributes::new().class(class))?;
    Ok(block.class().to_string())
}
