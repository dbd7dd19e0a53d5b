use serde_json::Value;
use tracing::debug;

use crate::{
    config::ProfileConfig,
    error::{ApiError, FieldError},
    profiles::{
        dto::ProfileInput,
        repo_types::{ProfileFields, SocialLinks},
    },
    validation::{echo, Rules},
};

/// Keys that describe the document itself and can never come from `extra`.
const RESERVED_KEYS: &[&str] = &["id", "_id", "user", "social", "date", "created_at", "updated_at"];

/// Validates an upsert payload and turns it into the set of fields to write.
pub fn build_fields(input: ProfileInput, cfg: &ProfileConfig) -> Result<ProfileFields, ApiError> {
    let ProfileInput {
        status,
        skills,
        website,
        company,
        location,
        bio,
        githubusername,
        youtube,
        twitter,
        instagram,
        linkedin,
        facebook,
        mut extra,
    } = input;

    extra.retain(|key, _| {
        let reserved = RESERVED_KEYS.contains(&key.as_str());
        if reserved {
            debug!(key = %key, "dropping reserved profile key");
        }
        !reserved
    });

    let mut rules = Rules::new();
    rules
        .check(
            status.as_deref().is_some_and(|s| !s.is_empty()),
            "status",
            echo(&status),
            "Status is required",
        )
        .check(
            skills.as_ref().is_some_and(|s| !s.is_empty()),
            "skills",
            None,
            "Skills is required",
        );
    if extra.len() > cfg.max_extra_fields {
        rules.push(FieldError::body(
            "extra",
            Some(Value::from(extra.len())),
            format!(
                "At most {} additional profile fields are allowed",
                cfg.max_extra_fields
            ),
        ));
    }
    rules.finish()?;

    Ok(ProfileFields {
        website: website.filter(|w| !w.is_empty()).unwrap_or_default(),
        status: status.unwrap_or_default(),
        skills: skills
            .map(|s| s.normalize(cfg.legacy_skill_padding))
            .unwrap_or_default(),
        company,
        location,
        bio,
        githubusername,
        social: SocialLinks {
            youtube: non_empty(youtube),
            twitter: non_empty(twitter),
            instagram: non_empty(instagram),
            linkedin: non_empty(linkedin),
            facebook: non_empty(facebook),
        },
        extra,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
