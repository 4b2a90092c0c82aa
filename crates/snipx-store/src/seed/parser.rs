//! Seed parser with validation

use crate::errors::{seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use snipx_core::model::language::validate_slug;
use snipx_core::model::user::validate_username;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| seed_validation(&format!("Failed to read seed file: {}", e)))?;
    parse_seed_str(&content)
}

pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;
    validate_seed(&seed)?;
    Ok(seed)
}

/// Checks that need nothing but the file itself
fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut slugs = HashSet::new();
    let mut names = HashSet::new();
    for language in &seed.languages {
        if language.name.trim().is_empty() {
            return Err(seed_validation("Language name must not be empty"));
        }
        let slug = language.effective_slug();
        validate_slug(&slug).map_err(|e| seed_validation(&e.to_string()))?;
        if !slugs.insert(slug.clone()) {
            return Err(seed_validation(&format!("Duplicate language slug: {}", slug)));
        }
        if !names.insert(language.name.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate language name: {}",
                language.name
            )));
        }
    }

    let mut usernames = HashSet::new();
    for user in &seed.users {
        validate_username(&user.username).map_err(|e| seed_validation(&e.to_string()))?;
        if user.password.expose().is_empty() {
            return Err(seed_validation(&format!(
                "User {} has an empty password",
                user.username
            )));
        }
        if !usernames.insert(user.username.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate username: {}",
                user.username
            )));
        }
    }

    Ok(())
}
