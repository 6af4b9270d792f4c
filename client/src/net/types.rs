//! Shared wire DTOs for the browser/gateway boundary.
//!
//! DESIGN
//! ======
//! The gateway decodes backend documents into these types and serializes them
//! as plain JSON, so the browser never sees backend-specific value encodings.
//! Timestamps travel as RFC 3339 strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An archived article record. Read-only from the client's perspective.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Display title.
    pub title: String,
    /// Creation time; the backend orders by this field, descending.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Base64-encoded PNG thumbnail, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    /// Stored-file path of the PDF copy. Presence selects frame mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    /// Original external link, always present.
    pub url: String,
}

impl Article {
    /// Stored PDF path, if there is a non-empty one.
    #[must_use]
    pub fn pdf_path(&self) -> Option<&str> {
        self.pdf.as_deref().filter(|p| !p.is_empty())
    }
}

/// The signed-in user as reported by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    /// Identity provider the session was created with (e.g. `"google.com"`).
    pub provider: String,
}

/// Response body of `/api/files/url`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadUrl {
    pub url: String,
}

/// JSON error body returned by every failing gateway route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// External identity providers the gateway can sign users in with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    #[default]
    Google,
    GitHub,
}

impl ProviderKind {
    /// All supported providers.
    pub const ALL: [Self; 2] = [Self::Google, Self::GitHub];

    /// Path segment used by the gateway's `/auth/{provider}` routes.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }

    /// Parse a route path segment back into a provider.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }

    /// Provider identifier understood by the identity backend.
    #[must_use]
    pub fn provider_id(self) -> &'static str {
        match self {
            Self::Google => "google.com",
            Self::GitHub => "github.com",
        }
    }

    /// Human-readable provider name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::GitHub => "GitHub",
        }
    }
}
