//! Common test utilities for weibo-timeline integration tests

use serde_json::{Value, json};

/// Build one status JSON object the way the timeline endpoint emits it.
#[allow(dead_code)]
pub fn status_json(id: i64) -> Value {
    json!({
        "created_at": "Tue May 31 17:46:55 +0800 2011",
        "id": id,
        "idstr": id.to_string(),
        "mid": format!("561281451054651{id}"),
        "text": format!("status #{id}"),
        "source": "<a href=\"http://weibo.com\" rel=\"nofollow\">weibo</a>",
        "favorited": false,
        "reposts_count": 3,
        "comments_count": 1,
        "attitudes_count": 0,
        "user": {
            "id": 1404376560_i64,
            "idstr": "1404376560",
            "screen_name": "zaku",
            "name": "zaku",
            "followers_count": 1204,
            "statuses_count": 1853,
            "verified": false
        }
    })
}

/// Build a `statuses/user_timeline` response page for the given ids.
#[allow(dead_code)]
pub fn timeline_json(ids: &[i64]) -> Value {
    json!({
        "statuses": ids.iter().map(|id| status_json(*id)).collect::<Vec<_>>()
    })
}

/// Build the error payload the API returns with non-success statuses.
#[allow(dead_code)]
pub fn error_json(code: i64, message: &str) -> Value {
    json!({
        "error": message,
        "error_code": code,
        "request": "/2/statuses/user_timeline.json"
    })
}
