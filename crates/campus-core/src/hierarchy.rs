//! Field localization and leveling of organisational trees.

use serde::Serialize;
use std::collections::VecDeque;

use crate::locale::Locale;
use crate::model::OrgNode;

/// Anything that exposes language-suffixed text fields by full key,
/// e.g. `position_ru`.
pub trait FieldSource {
    fn field(&self, key: &str) -> Option<&str>;
}

impl FieldSource for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_json::Value::as_str)
    }
}

/// A rooted tree node with ordered children.
pub trait Hierarchical: Sized {
    fn children(&self) -> &[Self];
}

/// Localized text for `field`, falling back locale → ru → en → "".
///
/// Empty strings count as missing at every step.
pub fn localize_field<N: FieldSource + ?Sized>(node: &N, field: &str, locale: Locale) -> String {
    let lookup = |l: Locale| {
        l.field_suffixes()
            .iter()
            .find_map(|suffix| node.field(&format!("{field}_{suffix}")).filter(|v| !v.is_empty()))
    };
    lookup(locale)
        .or_else(|| lookup(Locale::Ru))
        .or_else(|| lookup(Locale::En))
        .unwrap_or_default()
        .to_string()
}

/// Group a tree into breadth-first levels: `[[root], [children...], ...]`.
///
/// Siblings keep their order. Terminates for any finite acyclic tree.
pub fn levelize<N: Hierarchical>(root: &N) -> Vec<Vec<&N>> {
    let mut levels: Vec<Vec<&N>> = Vec::new();
    let mut queue = VecDeque::from([(root, 0usize)]);
    while let Some((node, depth)) = queue.pop_front() {
        if levels.len() == depth {
            levels.push(Vec::new());
        }
        levels[depth].push(node);
        queue.extend(node.children().iter().map(|child| (child, depth + 1)));
    }
    levels
}

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Generated initials avatar for people without a photo.
pub fn initials_avatar(full_name: &str) -> String {
    let name: String = url::form_urlencoded::byte_serialize(full_name.as_bytes()).collect();
    format!("{AVATAR_SERVICE}?name={name}&size=400&background=3b82f6&color=fff&rounded=true")
}

/// Localized render model of one [`OrgNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgCard {
    pub id: String,
    /// Unit or role title shown as the card heading.
    pub name: String,
    pub head: String,
    pub position: String,
    pub bio: String,
    pub avatar: String,
}

impl OrgCard {
    pub fn from_node(node: &OrgNode, locale: Locale) -> Self {
        let head = localize_field(node, "full_name", locale);
        let position = localize_field(node, "position", locale);
        let avatar = node
            .photo
            .clone()
            .unwrap_or_else(|| initials_avatar(&head));
        Self {
            id: node.id.clone(),
            name: position.clone(),
            head,
            position,
            bio: localize_field(node, "bio", locale),
            avatar,
        }
    }
}

/// A tree rendered as localized cards grouped by depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgChart {
    pub levels: Vec<Vec<OrgCard>>,
}

impl OrgChart {
    pub fn build(root: &OrgNode, locale: Locale) -> Self {
        let levels = levelize(root)
            .into_iter()
            .map(|level| {
                level
                    .into_iter()
                    .map(|node| OrgCard::from_node(node, locale))
                    .collect()
            })
            .collect();
        Self { levels }
    }

    pub fn card_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}
