//! BEM entities: blocks and elements.
//!
//! Modifiers are not entities on their own; they are parsed as part of the
//! block or element they qualify. An entity is built in one step from raw
//! attributes and never changes afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BemError;

mod block;
pub(crate) mod classify;
mod element;

pub use block::Block;
pub use element::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Block,
    Element,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Element => "element",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = BemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Self::Block),
            "element" => Ok(Self::Element),
            other => Err(BemError::UnknownEntityKind(other.to_string())),
        }
    }
}

/// Classified class query, before composition.
#[derive(Debug, Clone)]
pub(crate) struct Draft {
    pub(crate) name: String,
    pub(crate) tag: String,
    pub(crate) modifiers: Vec<String>,
    pub(crate) nth_block_elements: Vec<String>,
    pub(crate) rest_classes: Vec<String>,
    pub(crate) passthrough: BTreeMap<String, String>,
    pub(crate) bem_id: bool,
}

impl Draft {
    /// Build the final attributes: `class` is name, modifiers, nth-block
    /// elements and rest classes joined in that order.
    pub(crate) fn compose(self) -> EntityParts {
        let class = std::iter::once(self.name.as_str())
            .chain(self.modifiers.iter().map(String::as_str))
            .chain(self.nth_block_elements.iter().map(String::as_str))
            .chain(self.rest_classes.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        let mut attributes = self.passthrough;
        attributes.insert("class".to_string(), class);
        if self.bem_id {
            attributes.insert("id".to_string(), self.name.clone());
        }

        EntityParts {
            name: self.name,
            tag: self.tag,
            modifiers: self.modifiers,
            nth_block_elements: self.nth_block_elements,
            rest_classes: self.rest_classes,
            attributes,
        }
    }
}

/// Data shared by every entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityParts {
    name: String,
    tag: String,
    modifiers: Vec<String>,
    nth_block_elements: Vec<String>,
    rest_classes: Vec<String>,
    attributes: BTreeMap<String, String>,
}

impl EntityParts {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    pub fn nth_block_elements(&self) -> &[String] {
        &self.nth_block_elements
    }

    pub fn rest_classes(&self) -> &[String] {
        &self.rest_classes
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

/// A created entity. Cloning shares the underlying block or element.
#[derive(Debug, Clone)]
pub enum Entity {
    Block(Rc<Block>),
    Element(Rc<Element>),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Block(_) => EntityKind::Block,
            Self::Element(_) => EntityKind::Element,
        }
    }

    pub fn parts(&self) -> &EntityParts {
        match self {
            Self::Block(block) => block.parts(),
            Self::Element(element) => element.parts(),
        }
    }

    pub fn name(&self) -> &str {
        self.parts().name()
    }

    pub fn tag(&self) -> &str {
        self.parts().tag()
    }

    pub fn modifiers(&self) -> &[String] {
        self.parts().modifiers()
    }

    pub fn nth_block_elements(&self) -> &[String] {
        self.parts().nth_block_elements()
    }

    pub fn rest_classes(&self) -> &[String] {
        self.parts().rest_classes()
    }

    /// Owned copy of the composed attributes.
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.parts().attributes().clone()
    }

    pub fn class(&self) -> &str {
        self.parts()
            .attributes()
            .get("class")
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn id(&self) -> Option<&str> {
        self.parts().attributes().get("id").map(String::as_str)
    }

    pub fn as_block(&self) -> Option<&Rc<Block>> {
        match self {
            Self::Block(block) => Some(block),
            Self::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Rc<Element>> {
        match self {
            Self::Element(element) => Some(element),
            Self::Block(_) => None,
        }
    }

    /// Whether both handles point at the same created entity.
    pub fn ptr_eq(&self, other: &Entity) -> bool {
        match (self, other) {
            (Self::Block(a), Self::Block(b)) => Rc::ptr_eq(a, b),
            (Self::Element(a), Self::Element(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Plain data projection, mainly for tests and debugging.
    pub fn to_object(&self) -> EntityObject {
        let parts = self.parts();
        EntityObject {
            kind: self.kind(),
            name: parts.name.clone(),
            tag: parts.tag.clone(),
            modifiers: parts.modifiers.clone(),
            nth_block_elements: parts.nth_block_elements.clone(),
            rest_classes: parts.rest_classes.clone(),
            attributes: parts.attributes.clone(),
        }
    }
}

impl From<Block> for Entity {
    fn from(block: Block) -> Self {
        Self::Block(Rc::new(block))
    }
}

impl From<Element> for Entity {
    fn from(element: Element) -> Self {
        Self::Element(Rc::new(element))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityObject {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub name: String,
    pub tag: String,
    pub modifiers: Vec<String>,
    pub nth_block_elements: Vec<String>,
    pub rest_classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> Draft {
        Draft {
            name: name.to_string(),
            tag: "div".to_string(),
            modifiers: vec![format!("{name}--big")],
            nth_block_elements: vec!["Form__label".to_string()],
            rest_classes: vec!["js-toggle".to_string()],
            passthrough: BTreeMap::from([("role".to_string(), "button".to_string())]),
            bem_id: false,
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("block".parse::<EntityKind>(), Ok(EntityKind::Block));
        assert_eq!("element".parse::<EntityKind>(), Ok(EntityKind::Element));
        assert_eq!(
            "Block".parse::<EntityKind>(),
            Err(BemError::UnknownEntityKind("Block".to_string()))
        );
    }

    #[test]
    fn test_compose_class_order() {
        let parts = draft("Toggle").compose();
        assert_eq!(
            parts.attributes().get("class").map(String::as_str),
            Some("Toggle Toggle--big Form__label js-toggle")
        );
        assert_eq!(
            parts.attributes().get("role").map(String::as_str),
            Some("button")
        );
        assert!(!parts.attributes().contains_key("id"));
    }

    #[test]
    fn test_compose_with_id() {
        let mut d = draft("Toggle");
        d.bem_id = true;
        let parts = d.compose();
        assert_eq!(parts.attributes().get("id").map(String::as_str), Some("Toggle"));
    }

    #[test]
    fn test_compose_keeps_passthrough_id_without_bem_id() {
        let mut d = draft("Toggle");
        d.passthrough.insert("id".to_string(), "kept".to_string());
        let parts = d.compose();
        assert_eq!(parts.attributes().get("id").map(String::as_str), Some("kept"));
    }
}
