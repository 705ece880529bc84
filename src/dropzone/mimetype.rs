//! Accepted-mimetype filters.
//!
//! A filter is one mimetype, a list of mimetypes, or an alias naming a group
//! (`image`, `text`). Aliases only expand when the whole filter is a single
//! alias string; inside a list every entry is taken literally.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

static DEFAULT_ALIASES: Lazy<BTreeMap<String, Vec<String>>> = Lazy::new(|| {
    let mut aliases = BTreeMap::new();
    aliases.insert(
        "image".to_string(),
        vec![
            "image/gif".to_string(),
            "image/jpeg".to_string(),
            "image/png".to_string(),
        ],
    );
    aliases.insert("text".to_string(), vec!["text/plain".to_string()]);
    aliases
});

/// What a caller is willing to accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accept {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for Accept {
    fn from(value: &str) -> Self {
        Accept::Single(value.to_string())
    }
}

impl From<String> for Accept {
    fn from(value: String) -> Self {
        Accept::Single(value)
    }
}

impl From<Vec<String>> for Accept {
    fn from(values: Vec<String>) -> Self {
        Accept::List(values)
    }
}

impl From<Vec<&str>> for Accept {
    fn from(values: Vec<&str>) -> Self {
        Accept::List(values.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Accept {
    fn from(values: &[&str]) -> Self {
        Accept::List(values.iter().map(|v| v.to_string()).collect())
    }
}

impl Accept {
    /// Build a filter from CLI or config values: one value stays `Single`
    /// (so aliases work), several become a `List`. Empty means no filter.
    pub fn from_values(values: &[String]) -> Option<Self> {
        match values {
            [] => None,
            [single] => Some(Accept::Single(single.clone())),
            many => Some(Accept::List(many.to_vec())),
        }
    }
}

/// Alias table used to resolve [`Accept`] filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeAliases {
    aliases: BTreeMap<String, Vec<String>>,
}

impl Default for MimeAliases {
    fn default() -> Self {
        Self {
            aliases: DEFAULT_ALIASES.clone(),
        }
    }
}

impl MimeAliases {
    /// Built-in aliases extended (or overridden) by `extra`.
    pub fn with_extra(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut aliases = Self::default();
        for (name, types) in extra {
            aliases.insert(name, types.clone());
        }
        aliases
    }

    pub fn insert(&mut self, name: &str, types: Vec<String>) {
        self.aliases.insert(name.to_string(), types);
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.aliases.get(name).map(|v| v.as_slice())
    }

    /// Expand a filter into the concrete set of accepted mimetypes.
    pub fn resolve(&self, accept: &Accept) -> Vec<String> {
        match accept {
            Accept::Single(value) => match self.aliases.get(value) {
                Some(types) => types.clone(),
                None => vec![value.clone()],
            },
            Accept::List(values) => values.clone(),
        }
    }

    /// MIME types compare case-insensitively.
    pub fn accepts(&self, accept: &Accept, media_type: &str) -> bool {
        self.resolve(accept)
            .iter()
            .any(|t| t.eq_ignore_ascii_case(media_type.trim()))
    }
}
