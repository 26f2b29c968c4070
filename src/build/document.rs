use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

/// The line that opens and closes a front matter block.
const FRONT_MATTER_MARKER: &str = "---";

// =============================================================================
// Documents
// =============================================================================

/// One parsed post.
///
/// Documents are built once per loader pass and never mutated afterwards;
/// every run rebuilds the full set from the sources.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the posts directory, `/`-separated (e.g. "2015-02-13-a.md")
    pub path: String,
    pub title: String,
    /// URL slug: the filename without its date prefix, or the `slug` override
    pub slug: String,
    pub date: NaiveDateTime,
    pub categories: BTreeSet<String>,
    /// Layout name from front matter; `None` means the configured default
    pub layout: Option<String>,
    pub published: bool,
    /// Permalink the post is published at (e.g. "/2015/02/13/a/")
    pub url: String,
    /// Front matter keys with no fixed meaning, passed through to templates
    pub extra: BTreeMap<String, serde_yaml::Value>,
    /// Raw body text following the front matter block
    pub body: String,
}

impl Document {
    /// The layout to render this document with.
    pub fn layout_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.layout.as_deref().unwrap_or(default)
    }
}

// =============================================================================
// Front matter
// =============================================================================

/// Front matter metadata parsed from the document.
///
/// Known keys are typed fields; everything else lands in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    /// Date override; takes precedence over the filename prefix
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(default)]
    pub categories: Option<Categories>,
    /// Singular form, merged into `categories`
    pub category: Option<String>,
    pub layout: Option<String>,
    /// Custom slug override
    pub slug: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    /// Additional arbitrary metadata (available in templates as `page.<key>`)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            categories: None,
            category: None,
            layout: None,
            slug: None,
            published: default_published(),
            extra: BTreeMap::new(),
        }
    }
}

/// Categories may be written as a list or as one space-separated string.
///
/// ```yaml
/// categories: [ruby, tutorial]
/// categories: ruby tutorial
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Categories {
    List(Vec<String>),
    Spaced(String),
}

impl FrontMatter {
    /// All categories named by `categories` and `category`, deduplicated.
    ///
    /// Names are trimmed and compared case-sensitively; blank names are dropped.
    pub fn category_set(&self) -> BTreeSet<String> {
        let listed: Vec<&str> = match &self.categories {
            Some(Categories::List(items)) => items.iter().map(String::as_str).collect(),
            Some(Categories::Spaced(s)) => s.split_whitespace().collect(),
            None => Vec::new(),
        };

        listed
            .into_iter()
            .chain(self.category.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Accept a date written as a string or as a bare number (`date: 2015`)
/// so the error surfaces as an invalid date rather than a type mismatch.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "date must be a string, found {other:?}"
        ))),
    }
}

/// Why a front matter block could not be parsed.
#[derive(thiserror::Error, Debug)]
pub enum FrontMatterError {
    #[error("missing front matter (expected a leading `---` line)")]
    Missing,

    #[error("front matter is missing its closing `---` line")]
    Unclosed,

    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter field '{field}' has a mapping key templates cannot use: {key}")]
    UnsupportedKey { field: String, key: String },
}

/// Result of parsing front matter from markdown content.
#[derive(Debug)]
pub struct ParsedContent {
    pub front_matter: FrontMatter,
    /// The markdown content without the front matter block
    pub body: String,
}

/// Parse front matter from markdown content.
///
/// Front matter is a YAML block delimited by `---` lines at the start of the file:
///
/// ```markdown
/// ---
/// title: Blocks, Procs and Lambdas
/// categories: [ruby]
/// ---
///
/// Content starts here
/// ```
///
/// Unlike a lenient reader, a file without a complete block is an error:
/// every post must carry front matter.
pub fn parse_front_matter(content: &str) -> Result<ParsedContent, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next().ok_or(FrontMatterError::Missing)?;
    if opening.trim_end() != FRONT_MATTER_MARKER {
        return Err(FrontMatterError::Missing);
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == FRONT_MATTER_MARKER {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];

            let front_matter: FrontMatter = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            for (field, value) in &front_matter.extra {
                if let Some(key) = unsupported_key(value) {
                    return Err(FrontMatterError::UnsupportedKey {
                        field: field.clone(),
                        key: format!("{key:?}"),
                    });
                }
            }

            return Ok(ParsedContent {
                front_matter,
                body: body.trim_start_matches(['\r', '\n']).to_string(),
            });
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unclosed)
}

/// Find a nested mapping key that is neither a string nor an integer.
///
/// Templates see front matter as JSON, where object keys must be strings.
fn unsupported_key(value: &serde_yaml::Value) -> Option<&serde_yaml::Value> {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => map.iter().find_map(|(key, value)| match key {
            Value::String(_) => unsupported_key(value),
            Value::Number(n) if n.is_i64() || n.is_u64() => unsupported_key(value),
            other => Some(other),
        }),
        Value::Sequence(items) => items.iter().find_map(unsupported_key),
        Value::Tagged(tagged) => unsupported_key(&tagged.value),
        _ => None,
    }
}
