use serde::Serialize;

/// Literal `publish_to` value that marks a package as not for publication.
pub const UNPUBLISHED_SENTINEL: &str = "none";

/// Where a package is declared to be published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "url")]
pub enum PublishTo {
    /// `publish_to: none`; the package is exempt from link policy.
    Unpublished,
    /// A registry. `None` means the default public registry (no `publish_to`).
    Registry(Option<String>),
}

impl PublishTo {
    /// Map a raw `publish_to` value onto the tagged variant.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(UNPUBLISHED_SENTINEL) => PublishTo::Unpublished,
            Some(url) => PublishTo::Registry(Some(url.to_string())),
            None => PublishTo::Registry(None),
        }
    }
}

/// Parsed top-level properties of a pubspec.yaml.
///
/// Only the keys the convention checks need are retained. Link fields hold
/// the text as written; they are not required to be valid URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pubspec {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub publish_to: PublishTo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_tracker: Option<String>,
}
