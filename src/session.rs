//! Per-browser session state.
//!
//! The theme flag and the last generated image live in a `tower-sessions`
//! session. A session cookie is only issued once there is something to keep,
//! and every request that carries the cookie pushes the inactivity deadline
//! forward.

use data_encoding::BASE64;
use serde::{Deserialize, Serialize};
use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::ServerConfig;
use crate::theme::Theme;

pub const SESSION_COOKIE: &str = "qr_studio_session";

const THEME_KEY: &str = "theme";
const IMAGE_KEY: &str = "image";

pub type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// PNG bytes of the most recent successful generation.
///
/// Stored in the session as base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GeneratedImage {
    png: Vec<u8>,
}

impl GeneratedImage {
    pub fn new(png: Vec<u8>) -> Self {
        Self { png }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.png
    }
}

impl From<GeneratedImage> for String {
    fn from(image: GeneratedImage) -> Self {
        BASE64.encode(&image.png)
    }
}

impl TryFrom<String> for GeneratedImage {
    type Error = data_encoding::DecodeError;

    fn try_from(encoded: String) -> Result<Self, Self::Error> {
        BASE64.decode(encoded.as_bytes()).map(Self::new)
    }
}

/// The two values a session keeps between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub theme: Theme,
    pub image: Option<GeneratedImage>,
}

impl SessionState {
    pub async fn load(session: &Session) -> SessionResult<Self> {
        Ok(Self {
            theme: session.get(THEME_KEY).await?.unwrap_or_default(),
            image: session.get(IMAGE_KEY).await?,
        })
    }
}

pub async fn store_theme(session: &Session, theme: Theme) -> SessionResult<()> {
    session.insert(THEME_KEY, theme).await
}

/// Replace the stored image, or clear it when `image` is `None`.
pub async fn store_image(session: &Session, image: Option<&GeneratedImage>) -> SessionResult<()> {
    match image {
        Some(image) => session.insert(IMAGE_KEY, image).await,
        None => session.remove::<serde_json::Value>(IMAGE_KEY).await.map(|_| ()),
    }
}

/// Session middleware backed by an in-memory store.
pub fn session_layer(config: &ServerConfig) -> SessionManagerLayer<MemoryStore> {
    let ttl = i64::try_from(config.session_ttl_secs).unwrap_or(i64::MAX);
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_always_save(true)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(ttl)))
}
