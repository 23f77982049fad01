//! Classification of BEM class queries.
//!
//! A class query is read left to right:
//! - `UL`: an uppercase first token is an explicit tag (`[A-Z1-6]+`)
//! - `Menu_main_dark`: the first non-tag token is the name, `_` splits inline modifiers
//! - `_active`: a standalone modifier for the name
//! - `_2-link_current`: an element of the 2nd enclosing block, with its own modifiers
//! - anything else is kept verbatim as a rest class

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::attributes::RawAttributes;
use crate::config::Separators;
use crate::error::BemError;
use crate::factory::stack::EntityStack;

use super::Draft;

/// Splits a name or element token into its inline modifiers.
const MODIFIER_DELIMITER: char = '_';

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"^[A-Z1-6]+$").expect("Invalid tag regex"))
}

fn modifier_regex() -> &'static Regex {
    static MODIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
    MODIFIER_REGEX
        .get_or_init(|| Regex::new(r"^_[a-zA-Z][a-zA-Z0-9]*").expect("Invalid modifier regex"))
}

fn nth_block_element_regex() -> &'static Regex {
    static NTH_REGEX: OnceLock<Regex> = OnceLock::new();
    NTH_REGEX.get_or_init(|| Regex::new(r"^_([0-9])-").expect("Invalid nth-block-element regex"))
}

fn list_tag_regex() -> &'static Regex {
    static LIST_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    LIST_TAG_REGEX.get_or_init(|| Regex::new(r"^(ul|ol)$").expect("Invalid list tag regex"))
}

/// Where a token sits in the query, which decides the rules that apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// First token: tag or name.
    Leading,
    /// Token right after an explicit tag: always the name.
    Name,
    /// Everything after the name.
    Trailing,
}

#[derive(Debug, PartialEq, Eq)]
enum ClassToken<'a> {
    Tag(String),
    Name {
        name: &'a str,
        modifiers: Vec<&'a str>,
    },
    Modifier(&'a str),
    NthBlockElement {
        depth: usize,
        element: &'a str,
        modifiers: Vec<&'a str>,
    },
    Rest(&'a str),
}

fn split_modifiers(token: &str) -> (&str, Vec<&str>) {
    let mut parts = token.split(MODIFIER_DELIMITER);
    let name = parts.next().unwrap_or_default();
    (name, parts.collect())
}

fn classify_token(token: &str, slot: Slot) -> ClassToken<'_> {
    match slot {
        Slot::Leading if tag_regex().is_match(token) => ClassToken::Tag(token.to_lowercase()),
        Slot::Leading | Slot::Name => {
            let (name, modifiers) = split_modifiers(token);
            ClassToken::Name { name, modifiers }
        }
        Slot::Trailing => {
            if modifier_regex().is_match(token) {
                return ClassToken::Modifier(&token[MODIFIER_DELIMITER.len_utf8()..]);
            }
            if let Some(caps) = nth_block_element_regex().captures(token) {
                let prefix = caps.get(0).map_or(0, |m| m.end());
                let depth = caps[1].parse::<usize>().unwrap_or_default();
                let (element, modifiers) = split_modifiers(&token[prefix..]);
                return ClassToken::NthBlockElement {
                    depth,
                    element,
                    modifiers,
                };
            }
            ClassToken::Rest(token)
        }
    }
}

/// What the classifier needs from the factory: separators and the open blocks.
pub(crate) struct ClassContext<'a> {
    pub(crate) separators: &'a Separators,
    pub(crate) stack: &'a EntityStack,
}

impl ClassContext<'_> {
    fn apply_modifier(&self, name: &str, modifier: &str) -> String {
        format!("{}{}{}", name, self.separators.modifier, modifier)
    }

    fn resolve_nth_block_element(
        &self,
        depth: usize,
        element: &str,
        token: &str,
    ) -> Result<String, BemError> {
        let block = self
            .stack
            .block(depth)
            .ok_or_else(|| BemError::AncestorNotFound {
                depth,
                token: token.to_string(),
            })?;
        Ok(format!(
            "{}{}{}",
            block.parts().name(),
            self.separators.element,
            element
        ))
    }

    /// Tag for entities without an explicit tag token.
    fn infer_tag(&self, attributes: &BTreeMap<String, String>) -> String {
        if attributes.get("href").is_some_and(|href| !href.is_empty()) {
            return "a".to_string();
        }

        if let Some(block) = self.stack.block(1)
            && list_tag_regex().is_match(block.parts().tag())
        {
            return "li".to_string();
        }

        "div".to_string()
    }
}

/// Classify the class query of `attrs` into a draft entity.
///
/// Names and modifiers are not yet scoped to an owning block; elements do that
/// before composing.
pub(crate) fn parse_entity(attrs: &RawAttributes, ctx: &ClassContext) -> Result<Draft, BemError> {
    let mut name = String::new();
    let mut tag: Option<String> = None;
    let mut modifiers = Vec::new();
    let mut nth_block_elements = Vec::new();
    let mut rest_classes = Vec::new();

    for (i, token) in attrs.class_tokens().into_iter().enumerate() {
        let slot = match (i, tag.is_some()) {
            (0, _) => Slot::Leading,
            (1, true) => Slot::Name,
            _ => Slot::Trailing,
        };

        let class_token = classify_token(token, slot);
        log::trace!("Classified '{}' as {:?}", token, class_token);

        match class_token {
            ClassToken::Tag(explicit) => tag = Some(explicit),
            ClassToken::Name {
                name: parsed,
                modifiers: inline,
            } => {
                name = parsed.to_string();
                modifiers.extend(inline.into_iter().map(|m| ctx.apply_modifier(&name, m)));
            }
            ClassToken::Modifier(modifier) => {
                modifiers.push(ctx.apply_modifier(&name, modifier));
            }
            ClassToken::NthBlockElement {
                depth,
                element,
                modifiers: inline,
            } => {
                let resolved = ctx.resolve_nth_block_element(depth, element, token)?;
                let qualified: Vec<String> = inline
                    .into_iter()
                    .map(|m| ctx.apply_modifier(&resolved, m))
                    .collect();
                nth_block_elements.push(resolved);
                nth_block_elements.extend(qualified);
            }
            ClassToken::Rest(class) => rest_classes.push(class.to_string()),
        }
    }

    let tag = tag.unwrap_or_else(|| ctx.infer_tag(&attrs.rest));

    Ok(Draft {
        name,
        tag,
        modifiers,
        nth_block_elements,
        rest_classes,
        passthrough: attrs.rest.clone(),
        bem_id: attrs.bem_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_tag() {
        assert_eq!(
            classify_token("H2", Slot::Leading),
            ClassToken::Tag("h2".to_string())
        );
        assert_eq!(
            classify_token("LI", Slot::Leading),
            ClassToken::Tag("li".to_string())
        );
    }

    #[test]
    fn test_leading_name_with_modifiers() {
        assert_eq!(
            classify_token("Block_m1_m2", Slot::Leading),
            ClassToken::Name {
                name: "Block",
                modifiers: vec!["m1", "m2"]
            }
        );
    }

    #[test]
    fn test_tag_pattern_only_checked_first() {
        assert_eq!(
            classify_token("UL", Slot::Name),
            ClassToken::Name {
                name: "UL",
                modifiers: vec![]
            }
        );
        assert_eq!(classify_token("UL", Slot::Trailing), ClassToken::Rest("UL"));
    }

    #[test]
    fn test_lowercase_or_mixed_is_not_tag() {
        assert!(matches!(
            classify_token("Ul", Slot::Leading),
            ClassToken::Name { name: "Ul", .. }
        ));
        assert!(matches!(
            classify_token("H7", Slot::Leading),
            ClassToken::Name { name: "H7", .. }
        ));
    }

    #[test]
    fn test_standalone_modifier() {
        assert_eq!(
            classify_token("_isActive", Slot::Trailing),
            ClassToken::Modifier("isActive")
        );
        // Prefix match only, the remainder is kept whole.
        assert_eq!(
            classify_token("_size-large", Slot::Trailing),
            ClassToken::Modifier("size-large")
        );
    }

    #[test]
    fn test_nth_block_element() {
        assert_eq!(
            classify_token("_2-link_current", Slot::Trailing),
            ClassToken::NthBlockElement {
                depth: 2,
                element: "link",
                modifiers: vec!["current"]
            }
        );
    }

    #[test]
    fn test_rest() {
        assert_eq!(classify_token("js-hook", Slot::Trailing), ClassToken::Rest("js-hook"));
        assert_eq!(classify_token("_1x", Slot::Trailing), ClassToken::Rest("_1x"));
        assert_eq!(classify_token("_12-x", Slot::Trailing), ClassToken::Rest("_12-x"));
    }

    #[test]
    fn test_parse_entity_partitions_tokens() {
        let separators = Separators::default();
        let stack = EntityStack::new();
        let ctx = ClassContext {
            separators: &separators,
            stack: &stack,
        };
        let attrs = RawAttributes::new().class("SECTION Panel_wide extra _dark");

        let draft = parse_entity(&attrs, &ctx).unwrap();
        assert_eq!(draft.name, "Panel");
        assert_eq!(draft.tag, "section");
        assert_eq!(draft.modifiers, vec!["Panel--wide", "Panel--dark"]);
        assert!(draft.nth_block_elements.is_empty());
        assert_eq!(draft.rest_classes, vec!["extra"]);
    }

    #[test]
    fn test_parse_entity_without_blocks_fails_on_nth() {
        let separators = Separators::default();
        let stack = EntityStack::new();
        let ctx = ClassContext {
            separators: &separators,
            stack: &stack,
        };
        let attrs = RawAttributes::new().class("Panel _1-title");

        assert_eq!(
            parse_entity(&attrs, &ctx).unwrap_err(),
            BemError::AncestorNotFound {
                depth: 1,
                token: "_1-title".to_string()
            }
        );
    }

    #[test]
    fn test_infer_tag() {
        let separators = Separators::default();
        let stack = EntityStack::new();
        let ctx = ClassContext {
            separators: &separators,
            stack: &stack,
        };

        let link = RawAttributes::new().class("Link").attr("href", "/");
        assert_eq!(parse_entity(&link, &ctx).unwrap().tag, "a");

        let empty_href = RawAttributes::new().class("Link").attr("href", "");
        assert_eq!(parse_entity(&empty_href, &ctx).unwrap().tag, "div");
    }
}
