//! Core wire types for weibo-timeline
//!
//! The structs mirror the JSON objects the remote API returns. Fields the
//! service omits for a given record are tolerated via `#[serde(default)]`, so
//! a sparse payload never fails to decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used by the API, e.g. `Tue May 31 17:46:55 +0800 2011`
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Identifies whose timeline to fetch: a screen name or a numeric user id.
///
/// The remote endpoint accepts exactly one of the two; modeling the choice as
/// an enum makes "both set" or "neither set" unrepresentable. An empty screen
/// name is still rejected at call time with
/// [`Error::InvalidSubject`](crate::error::Error::InvalidSubject).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// Screen name (sent as the `screen_name` request parameter)
    ScreenName(String),
    /// Numeric user id (sent as the `uid` request parameter)
    UserId(i64),
}

impl Subject {
    /// Create a subject from a screen name
    pub fn screen_name(name: impl Into<String>) -> Self {
        Self::ScreenName(name.into())
    }

    /// Create a subject from a numeric user id
    pub fn user_id(id: i64) -> Self {
        Self::UserId(id)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::ScreenName(name) => write!(f, "{name}"),
            Subject::UserId(id) => write!(f, "uid:{id}"),
        }
    }
}

/// One timeline entry (a single status/post)
///
/// `id` is assigned by the service and increases monotonically with posting
/// time, so it serves both as the global sort key (descending = newest first)
/// and as the deduplication identity when pages overlap. A `Status` is
/// immutable once fetched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    /// Unique, monotonically-increasing status id
    pub id: i64,
    /// String form of the id (the service sends both)
    pub idstr: String,
    /// Message id in the service's alternate numbering
    pub mid: String,
    /// Creation timestamp in the service's text format
    pub created_at: String,
    /// Status body text
    pub text: String,
    /// Client the status was posted from (HTML fragment)
    pub source: String,
    /// Whether the authenticated user favorited this status
    pub favorited: bool,
    /// Repost count at fetch time
    pub reposts_count: i64,
    /// Comment count at fetch time
    pub comments_count: i64,
    /// Like count at fetch time
    pub attitudes_count: i64,
    /// Thumbnail picture URL, if the status carries an image
    pub thumbnail_pic: String,
    /// Author of the status
    pub user: Option<User>,
    /// The reposted status, when this status is a repost
    pub retweeted_status: Option<Box<Status>>,
    /// Thumbnails for multi-image statuses
    pub pic_urls: Vec<PicUrl>,
}

impl Status {
    /// Parse `created_at` into a UTC timestamp.
    ///
    /// Returns `None` if the field is absent or not in the API's
    /// `%a %b %d %H:%M:%S %z %Y` format.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Author profile embedded in a [`Status`]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Unique user id
    pub id: i64,
    /// String form of the user id
    pub idstr: String,
    /// Unique handle shown in timelines
    pub screen_name: String,
    /// Display name
    pub name: String,
    /// Free-form location string
    pub location: String,
    /// Profile description
    pub description: String,
    /// Small avatar URL
    pub profile_image_url: String,
    /// Large avatar URL
    pub avatar_large: String,
    /// Follower count at fetch time
    pub followers_count: i64,
    /// Followee count at fetch time
    pub friends_count: i64,
    /// Total statuses posted
    pub statuses_count: i64,
    /// Whether the account is verified
    pub verified: bool,
    /// Verification blurb for verified accounts
    pub verified_reason: String,
}

/// One thumbnail entry in a multi-image status
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PicUrl {
    /// Thumbnail picture URL
    pub thumbnail_pic: String,
}

/// Envelope returned by the `statuses/user_timeline` endpoint
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    /// One page of statuses, newest first per the service's convention
    pub statuses: Vec<Status>,
}

/// Token obtained from the OAuth2 authorization-code exchange
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessToken {
    /// The bearer token to pass on API calls
    pub access_token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    /// Legacy lifetime field the service still sends
    pub remind_in: String,
    /// Id of the user the token was issued for
    pub uid: String,
}

/// Error payload the API returns with non-success HTTP statuses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorPayload {
    /// Human-readable error message
    pub error: String,
    /// Numeric error code
    pub error_code: i64,
    /// Request path the error refers to
    pub request: String,
}
