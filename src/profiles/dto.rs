use serde::Deserialize;
use serde_json::{Map, Value};

/// Skills arrive either as a list or as one comma separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Skills {
    List(Vec<String>),
    Csv(String),
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        match self {
            Skills::List(items) => items.is_empty(),
            Skills::Csv(s) => s.is_empty(),
        }
    }

    /// A list passes through untouched. A string is split on commas and each
    /// entry trimmed; with `legacy_padding` every entry gets a leading space
    /// and nothing is dropped, otherwise empty entries are removed.
    pub fn normalize(self, legacy_padding: bool) -> Vec<String> {
        match self {
            Skills::List(items) => items,
            Skills::Csv(s) if legacy_padding => {
                s.split(',').map(|skill| format!(" {}", skill.trim())).collect()
            }
            Skills::Csv(s) => s
                .split(',')
                .map(str::trim)
                .filter(|skill| !skill.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Body of `POST /api/profile`. Anything not named here lands in `extra`.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileInput {
    pub status: Option<String>,
    pub skills: Option<Skills>,
    pub website: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
