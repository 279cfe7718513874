//! Domain types representing expense categories.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Color given to categories created without an explicit one.
pub const DEFAULT_COLOR: &str = "#94A3B8";

const KEY_MAX_LEN: usize = 20;

const DEFAULT_SET: [(&str, &str, &str); 6] = [
    ("Food", "food", "#FF6B6B"),
    ("Transport", "transport", "#4CC9F0"),
    ("Shopping", "shopping", "#6A4C93"),
    ("Bills", "bills", "#FFC107"),
    ("Entertainment", "entertain", "#FF7AA2"),
    ("Other", "other", "#94A3B8"),
];

/// Named, colored tag attached to expenses by value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(alias = "value")]
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            key: derive_key(&name),
            name,
            color: color.into(),
        }
    }

    pub fn with_default_color(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_COLOR)
    }

    /// Renames in place, re-deriving the display key.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.key = derive_key(&self.name);
    }

    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// The six categories seeded on first run and after a reset.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_SET
        .iter()
        .map(|(name, key, color)| Category {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            key: (*key).to_string(),
            color: (*color).to_string(),
        })
        .collect()
}

/// Names of the default set, in seeding order.
pub fn default_category_names() -> impl Iterator<Item = &'static str> {
    DEFAULT_SET.iter().map(|(name, _, _)| *name)
}

/// Lowercases, collapses whitespace runs into `-`, and truncates.
pub fn derive_key(name: &str) -> String {
    let mut key = String::new();
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                key.push('-');
                in_space = true;
            }
        } else {
            key.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    key.chars().take(KEY_MAX_LEN).collect()
}

/// Parses `#RRGGBB` (case-insensitive).
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
