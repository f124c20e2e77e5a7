//! Handlers for the notifications panel.
//!
//! Notifications are currently a static placeholder feed; nothing is
//! persisted or delivered yet. The shape matches what a real feed would
//! return so clients can build against it.

use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// One notification card.
#[derive(Debug, Serialize)]
pub struct Notification {
    pub id: i64,
    /// One of `request`, `update`, `info`.
    pub kind: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    /// Human-readable relative time, e.g. "2 hours ago".
    pub time: &'static str,
    pub read: bool,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    _auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let items = vec![
        Notification {
            id: 1,
            kind: "request",
            title: "New book request",
            message: "Rahul is interested in your \"Data Structures\" book",
            time: "2 hours ago",
            read: false,
        },
        Notification {
            id: 2,
            kind: "update",
            title: "Book status updated",
            message: "Your \"Operating Systems\" book has been marked as taken",
            time: "1 day ago",
            read: false,
        },
        Notification {
            id: 3,
            kind: "info",
            title: "Welcome to BookSwap!",
            message: "Start by listing your old textbooks or browse available books",
            time: "3 days ago",
            read: true,
        },
    ];

    Ok(Json(DataResponse::new(items)))
}
