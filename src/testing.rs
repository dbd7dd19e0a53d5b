//! In-memory stores and request helpers shared by the handler tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    app::build_app,
    auth::{
        extractors::AUTH_HEADER,
        password::hash_password,
        repo::UserStore,
        repo_types::{NewUser, User},
    },
    config::{AppConfig, JwtConfig, ProfileConfig, DEFAULT_TOKEN_TTL_SECONDS},
    profiles::{
        repo::ProfileStore,
        repo_types::{Profile, ProfileFields, ProfileOwner, UserSummary},
    },
    state::AppState,
};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    fn summary(&self, id: Uuid) -> Option<UserSummary> {
        let users = self.users.lock().unwrap();
        users.iter().find(|u| u.id == id).map(|u| UserSummary {
            id: u.id,
            name: u.name.clone(),
            avatar: u.avatar.clone(),
        })
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar: user.avatar,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(created.clone());
        Ok(Some(created))
    }
}

/// Profiles keyed by owner, written under one lock like the unique index.
pub struct MemoryProfileStore {
    users: Arc<MemoryUserStore>,
    profiles: Mutex<HashMap<Uuid, Profile>>,
}

impl MemoryProfileStore {
    fn populated(&self, profile: Profile) -> Profile {
        match self.users.summary(profile.user.id()) {
            Some(owner) => profile.populate(owner),
            None => profile,
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn upsert(&self, user_id: Uuid, fields: ProfileFields) -> anyhow::Result<Profile> {
        let now = OffsetDateTime::now_utc();
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles.entry(user_id).or_insert_with(|| Profile {
            id: Uuid::new_v4(),
            user: ProfileOwner::Id(user_id),
            company: None,
            website: String::new(),
            location: None,
            status: String::new(),
            skills: Vec::new(),
            bio: None,
            githubusername: None,
            social: Default::default(),
            created_at: now,
            updated_at: now,
            extra: Default::default(),
        });

        profile.website = fields.website;
        profile.status = fields.status;
        profile.skills = fields.skills;
        profile.company = fields.company.or(profile.company.take());
        profile.location = fields.location.or(profile.location.take());
        profile.bio = fields.bio.or(profile.bio.take());
        profile.githubusername = fields.githubusername.or(profile.githubusername.take());
        profile.social = fields.social;
        profile.extra = fields.extra;
        profile.updated_at = now;
        Ok(profile.clone())
    }

    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let found = self.profiles.lock().unwrap().get(&user_id).cloned();
        Ok(found.map(|p| self.populated(p)))
    }

    async fn list(&self) -> anyhow::Result<Vec<Profile>> {
        let mut all: Vec<Profile> = self.profiles.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all.into_iter().map(|p| self.populated(p)).collect())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        jwt: JwtConfig {
            secret: "test-secret".into(),
            ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        },
        profile: ProfileConfig::default(),
    }
}

pub fn test_state() -> AppState {
    let users = Arc::new(MemoryUserStore::default());
    let profiles = Arc::new(MemoryProfileStore {
        users: users.clone(),
        profiles: Mutex::new(HashMap::new()),
    });
    AppState::from_parts(Arc::new(test_config()), users, profiles)
}

pub async fn seed_user(state: &AppState, name: &str, email: &str, password: &str) -> User {
    let new_user = NewUser {
        name: name.into(),
        email: email.into(),
        password_hash: hash_password(password).unwrap(),
        avatar: String::new(),
    };
    state
        .users
        .create(new_user)
        .await
        .unwrap()
        .expect("email not taken")
}

pub async fn call(
    state: &AppState,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(AUTH_HEADER, token);
    }
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    send(state, req.body(body).unwrap()).await
}

pub async fn send(state: &AppState, req: Request<Body>) -> Response {
    build_app(state.clone()).oneshot(req).await.unwrap()
}

pub async fn body_text(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(res: Response) -> Value {
    serde_json::from_str(&body_text(res).await).unwrap()
}
