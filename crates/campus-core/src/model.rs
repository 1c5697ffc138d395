//! Payload types returned by the backend.
//!
//! The backend flattens translations into suffixed fields
//! (`position_ru`, `position_en`, `position_kg`). `OrgNode` lifts those
//! into [`LocalizedString`]s at the boundary; the other payloads keep the
//! flat map and are read through [`crate::hierarchy::localize_field`].

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::hierarchy::{FieldSource, Hierarchical};
use crate::locale::Locale;

/// Text keyed by language; any subset of locales may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ru: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, alias = "ky", skip_serializing_if = "Option::is_none")]
    pub kg: Option<String>,
}

impl LocalizedString {
    /// Same text in every locale.
    pub fn uniform(text: &str) -> Self {
        Self {
            ru: Some(text.to_string()),
            en: Some(text.to_string()),
            kg: Some(text.to_string()),
        }
    }

    pub fn new(ru: &str, en: &str, kg: &str) -> Self {
        Self {
            ru: Some(ru.to_string()),
            en: Some(en.to_string()),
            kg: Some(kg.to_string()),
        }
    }

    pub fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::Ru => self.ru.as_deref(),
            Locale::En => self.en.as_deref(),
            Locale::Kg => self.kg.as_deref(),
        }
    }

    pub fn set(&mut self, locale: Locale, text: String) {
        match locale {
            Locale::Ru => self.ru = Some(text),
            Locale::En => self.en = Some(text),
            Locale::Kg => self.kg = Some(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        Locale::ALL
            .iter()
            .all(|l| self.get(*l).map_or(true, str::is_empty))
    }

    /// Collect `{base}_{suffix}` entries of a flat object.
    fn from_flat(base: &str, map: &Map<String, Value>) -> Self {
        let mut out = Self::default();
        for locale in Locale::ALL {
            let text = locale
                .field_suffixes()
                .iter()
                .find_map(|suffix| {
                    map.get(&format!("{base}_{suffix}"))
                        .and_then(Value::as_str)
                        .filter(|text| !text.is_empty())
                });
            if let Some(text) = text {
                out.set(locale, text.to_string());
            }
        }
        out
    }
}

/// Identifier that the backend sends either as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(RawId::deserialize(deserializer)?.into_string())
}

fn optional_id_as_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(RawId::into_string))
}

/// Wire form of an organisation node.
#[derive(Deserialize)]
struct RawOrgNode {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    children: Option<Vec<OrgNode>>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// A person or role in an organisational hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawOrgNode")]
pub struct OrgNode {
    pub id: String,
    pub position: LocalizedString,
    pub full_name: LocalizedString,
    pub bio: LocalizedString,
    pub photo: Option<String>,
    /// Never absent: missing or `null` children become an empty vector.
    pub children: Vec<OrgNode>,
}

impl From<RawOrgNode> for OrgNode {
    fn from(raw: RawOrgNode) -> Self {
        Self {
            position: LocalizedString::from_flat("position", &raw.rest),
            full_name: LocalizedString::from_flat("full_name", &raw.rest),
            bio: LocalizedString::from_flat("bio", &raw.rest),
            id: raw.id,
            photo: raw.photo.filter(|p| !p.is_empty()),
            children: raw.children.unwrap_or_default(),
        }
    }
}

impl OrgNode {
    /// A node with no bio, photo, or children.
    pub fn leaf(id: &str, position: LocalizedString, full_name: LocalizedString) -> Self {
        Self {
            id: id.to_string(),
            position,
            full_name,
            bio: LocalizedString::default(),
            photo: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OrgNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OrgNode::node_count).sum::<usize>()
    }

    /// Edges on the longest root-to-leaf path; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl FieldSource for OrgNode {
    fn field(&self, key: &str) -> Option<&str> {
        let (base, suffix) = key.rsplit_once('_')?;
        let locale = Locale::ALL
            .into_iter()
            .find(|l| l.field_suffixes().contains(&suffix))?;
        let text = match base {
            "position" => &self.position,
            "full_name" => &self.full_name,
            "bio" => &self.bio,
            _ => return None,
        };
        text.get(locale)
    }
}

impl Hierarchical for OrgNode {
    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Flat object with language-suffixed text fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedFields(pub Map<String, Value>);

impl LocalizedFields {
    /// Build from `(field, text)` pairs, e.g. `("title_ru", "...")`.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
        )
    }

    /// Plain, unsuffixed value such as `category` or `status`.
    pub fn plain(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Localized `key`, or the plain value when the backend already
    /// localized it server-side.
    pub fn text(&self, key: &str, locale: Locale) -> String {
        let localized = crate::hierarchy::localize_field(self, key, locale);
        if localized.is_empty() {
            self.plain(key).unwrap_or_default().to_string()
        } else {
            localized
        }
    }

    pub fn insert(&mut self, key: &str, text: &str) {
        self.0.insert(key.to_string(), Value::String(text.to_string()));
    }
}

impl FieldSource for LocalizedFields {
    fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Accepts `2024-12-01`, `2024-12-01T10:00:00Z`, or nothing.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_date(&s)))
}

/// Parse a calendar date from a date or RFC 3339 timestamp string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Faculty member listed on the management page.
#[derive(Debug, Clone, Deserialize)]
pub struct Teacher {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub text: LocalizedFields,
}

/// News category; older payloads send only `name`.
#[derive(Debug, Clone, Default)]
pub struct NewsCategory {
    pub text: LocalizedFields,
}

impl NewsCategory {
    /// Localized name, falling back to the unsuffixed `name` key.
    pub fn name(&self, locale: Locale) -> String {
        self.text.text("name", locale)
    }
}

/// Categories arrive as an object or, in older payloads, a bare name.
fn category_or_name<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NewsCategory>, D::Error> {
    let text = match Value::deserialize(deserializer)? {
        Value::Object(map) => LocalizedFields(map),
        Value::String(name) => LocalizedFields::from_pairs(&[("name", &name)]),
        _ => return Ok(None),
    };
    Ok(Some(NewsCategory { text }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub published_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "category_or_name")]
    pub category: Option<NewsCategory>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(flatten)]
    pub text: LocalizedFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventItem {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub text: LocalizedFields,
}

impl EventItem {
    /// `upcoming` unless the backend says otherwise.
    pub fn status(&self) -> &str {
        self.text.plain("status").unwrap_or("upcoming")
    }
}

/// Everything the mission page shows, delivered in one response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissionData {
    #[serde(default)]
    pub mission: LocalizedFields,
    #[serde(default)]
    pub history: Vec<LocalizedFields>,
    #[serde(default)]
    pub values: Vec<LocalizedFields>,
    #[serde(default)]
    pub priorities: Vec<LocalizedFields>,
    #[serde(default)]
    pub achievements: Vec<LocalizedFields>,
}

/// Research management positions grouped by type.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchPositionGroup {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub type_display: String,
    #[serde(default)]
    pub positions: Vec<ResearchPerson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchPerson {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(flatten)]
    pub text: LocalizedFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Council {
    #[serde(default, deserialize_with = "optional_id_as_string")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub text: LocalizedFields,
}
