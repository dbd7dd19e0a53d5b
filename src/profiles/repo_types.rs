use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

/// Links to the five supported platforms; unset links are left out of JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// Public part of the profile owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

/// Owner reference: a bare id, or the owner's summary when populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProfileOwner {
    Id(Uuid),
    Populated(UserSummary),
}

impl ProfileOwner {
    pub fn id(&self) -> Uuid {
        match self {
            ProfileOwner::Id(id) => *id,
            ProfileOwner::Populated(summary) => summary.id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub user: ProfileOwner,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub social: SocialLinks,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Additional attributes, written at the top level of the document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn populate(mut self, owner: UserSummary) -> Self {
        self.user = ProfileOwner::Populated(owner);
        self
    }
}

/// Normalized write set for an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub website: String,
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: SocialLinks,
    pub extra: Map<String, Value>,
}

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: String,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: Json<SocialLinks>,
    pub extra: Json<Map<String, Value>>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Self {
            id: r.id,
            user: ProfileOwner::Id(r.user_id),
            company: r.company,
            website: r.website,
            location: r.location,
            status: r.status,
            skills: r.skills,
            bio: r.bio,
            githubusername: r.githubusername,
            social: r.social.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
            extra: r.extra.0,
        }
    }
}

/// Profile joined with the owner's name and avatar.
#[derive(Debug, FromRow)]
pub struct PopulatedProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: String,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: Json<SocialLinks>,
    pub extra: Json<Map<String, Value>>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub owner_name: String,
    pub owner_avatar: String,
}

impl From<PopulatedProfileRow> for Profile {
    fn from(r: PopulatedProfileRow) -> Self {
        let owner = UserSummary {
            id: r.user_id,
            name: r.owner_name,
            avatar: r.owner_avatar,
        };
        Profile::from(ProfileRow {
            id: r.id,
            user_id: r.user_id,
            company: r.company,
            website: r.website,
            location: r.location,
            status: r.status,
            skills: r.skills,
            bio: r.bio,
            githubusername: r.githubusername,
            social: r.social,
            extra: r.extra,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
        .populate(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Profile {
        let mut extra = Map::new();
        extra.insert("hireable".into(), json!(true));
        Profile {
            id: Uuid::nil(),
            user: ProfileOwner::Id(Uuid::nil()),
            company: None,
            website: String::new(),
            location: Some("Berlin".into()),
            status: "Developer".into(),
            skills: vec!["rust".into()],
            bio: None,
            githubusername: None,
            social: SocialLinks {
                twitter: Some("https://twitter.com/x".into()),
                ..Default::default()
            },
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
            extra,
        }
    }

    #[test]
    fn extra_fields_sit_at_top_level() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["hireable"], true);
        assert!(json.get("extra").is_none());
        assert!(json.get("company").is_none());
        assert_eq!(json["website"], "");
        assert_eq!(json["social"], json!({ "twitter": "https://twitter.com/x" }));
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn owner_serializes_as_id_or_summary() {
        let profile = sample();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["user"], Uuid::nil().to_string());

        let populated = profile.populate(UserSummary {
            id: Uuid::nil(),
            name: "Ada".into(),
            avatar: "https://example.com/a.png".into(),
        });
        let json = serde_json::to_value(&populated).unwrap();
        assert_eq!(json["user"]["name"], "Ada");
        assert_eq!(json["user"]["avatar"], "https://example.com/a.png");
        assert_eq!(populated.user.id(), Uuid::nil());
    }
}
