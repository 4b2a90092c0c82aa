//! Seed Format v0 schema

use serde::Deserialize;
use snipx_core::core_types::Sensitive;
use snipx_core::model::language::slugify;

/// Top-level seed file structure
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0 {
    /// Must be 0
    pub schema_version: u32,

    #[serde(default)]
    pub languages: Vec<SeedLanguage>,

    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedLanguage {
    pub name: String,

    /// Derived from `name` when omitted
    #[serde(default)]
    pub slug: Option<String>,
}

impl SeedLanguage {
    pub fn effective_slug(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => slugify(&self.name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub username: String,

    #[serde(default)]
    pub email: Option<String>,

    /// Plain text in the file, hashed on import
    pub password: Sensitive<String>,
}
