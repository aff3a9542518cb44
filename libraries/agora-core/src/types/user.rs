/// Session user domain type and the sanitize boundary
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The currently authenticated user, as cached client-side.
///
/// A `SessionUser` only ever exists in fully-sanitized form: it is produced
/// by [`SessionUser::sanitize`] from a raw API payload, and a payload that
/// fails sanitization yields no user at all. Consumers never see a
/// partially-populated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Unique user identifier
    pub id: i64,

    /// Account email, empty when the API did not provide one
    #[serde(default)]
    pub email: String,

    /// Display name, empty when the API did not provide one
    #[serde(default)]
    pub nickname: String,

    /// Avatar URL, empty when the API did not provide one
    #[serde(default)]
    pub profile_image_url: String,

    /// Granted roles, in the order the API returned them
    #[serde(default)]
    pub roles: Vec<String>,

    /// Last login timestamp (ISO string), if known
    #[serde(default)]
    pub last_login_at: Option<String>,
}

impl SessionUser {
    /// Validate and coerce a raw API payload into the strict session shape.
    ///
    /// The payload must carry a numeric `id` (a legacy `userId` field is
    /// accepted as a fallback); anything else is rejected with `None`.
    /// Missing string fields default to empty, non-string role entries are
    /// dropped, and an empty `lastLoginAt` becomes `None`.
    pub fn sanitize(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;

        let id = object
            .get("id")
            .and_then(Value::as_i64)
            .or_else(|| object.get("userId").and_then(Value::as_i64))?;

        let text = |key: &str| -> String {
            object
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let roles = object
            .get("roles")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let last_login_at = object
            .get("lastLoginAt")
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Some(Self {
            id,
            email: text("email"),
            nickname: text("nickname"),
            profile_image_url: text("profileImageUrl"),
            roles,
            last_login_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitize_fills_defaults() {
        let user = SessionUser::sanitize(&json!({ "id": 7, "nickname": "Ann" }))
            .expect("id is numeric");

        assert_eq!(
            user,
            SessionUser {
                id: 7,
                email: String::new(),
                nickname: "Ann".to_string(),
                profile_image_url: String::new(),
                roles: vec![],
                last_login_at: None,
            }
        );
    }

    #[test]
    fn sanitize_accepts_legacy_user_id_field() {
        let user = SessionUser::sanitize(&json!({ "userId": 42, "email": "a@b.c" }))
            .expect("legacy id is numeric");
        assert_eq!(user.id, 42);
        assert_eq!(user.email, "a@b.c");
    }

    #[test]
    fn sanitize_prefers_id_over_user_id() {
        let user = SessionUser::sanitize(&json!({ "id": 1, "userId": 2 })).expect("id present");
        assert_eq!(user.id, 1);
    }

    #[test]
    fn sanitize_rejects_missing_or_non_numeric_id() {
        assert!(SessionUser::sanitize(&json!({})).is_none());
        assert!(SessionUser::sanitize(&json!({ "nickname": "ghost" })).is_none());
        assert!(SessionUser::sanitize(&json!({ "id": "7" })).is_none());
        assert!(SessionUser::sanitize(&json!(null)).is_none());
        assert!(SessionUser::sanitize(&json!("not an object")).is_none());
    }

    #[test]
    fn sanitize_drops_non_string_roles() {
        let user = SessionUser::sanitize(&json!({
            "id": 3,
            "roles": ["admin", 42, null, "member"],
        }))
        .expect("id present");
        assert_eq!(user.roles, vec!["admin", "member"]);
    }

    #[test]
    fn sanitize_normalizes_last_login() {
        let user = SessionUser::sanitize(&json!({ "id": 3, "lastLoginAt": "" }))
            .expect("id present");
        assert_eq!(user.last_login_at, None);

        let user = SessionUser::sanitize(&json!({ "id": 3, "lastLoginAt": "2025-06-01T10:00:00Z" }))
            .expect("id present");
        assert_eq!(
            user.last_login_at.as_deref(),
            Some("2025-06-01T10:00:00Z")
        );
    }
}
