//! The signed-in user's profile.

use axum::Json;

use crate::auth::RequireUser;
use crate::types::UserInfo;

/// `GET /api/me`.
pub async fn me(RequireUser(user): RequireUser) -> Json<UserInfo> {
    Json(UserInfo::from(user.user()))
}
