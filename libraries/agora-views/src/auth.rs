//! Auth screens: login, signup, and profile editing.

use crate::composer::Attachment;
use crate::error::{Result, ViewError};
use agora_dialog::DialogController;
use agora_server_client::{AgoraClient, ApiError, NewAccount, ProfileUpdate};
use agora_session::SessionStore;
use std::sync::Arc;
use tracing::warn;

/// Controller for the login screen.
pub struct LoginController {
    client: Arc<AgoraClient>,
    session: SessionStore,
}

impl LoginController {
    pub fn new(client: Arc<AgoraClient>, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Whether a session already exists (the login screen redirects away
    /// in that case).
    pub async fn already_authenticated(&self) -> bool {
        matches!(self.session.ensure_session(false).await, Ok(Some(_)))
    }

    /// Log in and cache the returned profile as the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let raw = self
            .client
            .auth()
            .login(email, password)
            .await
            .map_err(|err| match err {
                ApiError::AuthFailed(_) => {
                    ViewError::validation("Invalid email or password.")
                }
                other => {
                    warn!(error = %other, "Login request failed");
                    ViewError::from_api(&other, "Login failed.")
                }
            })?;

        self.session.save_session(&raw);
        Ok(())
    }
}

/// The signup form as entered.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub nickname: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Controller for the signup screen.
pub struct SignupController {
    client: Arc<AgoraClient>,
}

impl SignupController {
    pub fn new(client: Arc<AgoraClient>) -> Self {
        Self { client }
    }

    /// Create an account. The password/confirmation match is checked
    /// locally before anything is sent.
    pub async fn signup(&self, form: &SignupForm) -> Result<()> {
        if form.password != form.password_confirm {
            return Err(ViewError::validation("Passwords do not match."));
        }

        self.client
            .auth()
            .signup(&NewAccount {
                nickname: form.nickname.clone(),
                email: form.email.clone(),
                password: form.password.clone(),
            })
            .await
            .map_err(|err| {
                warn!(error = %err, "Signup request failed");
                ViewError::from_api(&err, "Signup failed.")
            })
    }
}

/// The profile form as loaded and edited.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub nickname: String,
    pub email: String,
    pub profile_image_url: String,
    /// Newly picked avatar, uploaded on save
    pub attachment: Option<Attachment>,
}

/// Controller for the profile edit screen.
pub struct ProfileController {
    client: Arc<AgoraClient>,
    session: SessionStore,
    dialogs: Arc<DialogController>,
}

impl ProfileController {
    pub fn new(
        client: Arc<AgoraClient>,
        session: SessionStore,
        dialogs: Arc<DialogController>,
    ) -> Self {
        Self {
            client,
            session,
            dialogs,
        }
    }

    /// Load the current profile into the form.
    pub async fn load(&self) -> Result<ProfileForm> {
        let raw = self.client.auth().fetch_profile().await.map_err(|err| {
            warn!(error = %err, "Failed to load profile");
            ViewError::from_api(&err, "Could not load your profile.")
        })?;

        let text = |key: &str| {
            raw.get(key)
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Ok(ProfileForm {
            nickname: text("nickname"),
            email: text("email"),
            profile_image_url: text("profileImageUrl"),
            attachment: None,
        })
    }

    /// Save the form, uploading a newly picked avatar first.
    pub async fn save(&self, form: ProfileForm) -> Result<()> {
        let nickname = form.nickname.trim().to_string();
        let email = form.email.trim().to_string();
        if nickname.is_empty() || email.is_empty() {
            return Err(ViewError::validation(
                "Please enter both a nickname and an email.",
            ));
        }

        let mut profile_image_url = form.profile_image_url.trim().to_string();
        let mut profile_image_id = None;

        if let Some(attachment) = form.attachment {
            let uploaded = self
                .client
                .files()
                .upload(
                    &attachment.file_name,
                    attachment.contents,
                    &attachment.content_type,
                )
                .await
                .map_err(|err| {
                    warn!(error = %err, "Failed to upload profile image");
                    ViewError::from_api(&err, "Could not upload the profile image.")
                })?;
            profile_image_id = Some(uploaded.id);
            if let Some(url) = uploaded.url {
                profile_image_url = url;
            }
        }

        let update = ProfileUpdate {
            nickname,
            email,
            profile_image_url: (!profile_image_url.is_empty()).then_some(profile_image_url),
            profile_image_id,
        };

        self.client
            .auth()
            .update_profile(&update)
            .await
            .map_err(|err| {
                warn!(error = %err, "Failed to update profile");
                ViewError::from_api(&err, "Could not update your profile.")
            })?;

        // The cached session keeps the old nickname until the next
        // refresh; force one so the header updates immediately.
        let _ = self.session.refresh_session().await;
        Ok(())
    }

    /// Delete the account behind a confirm dialog. Clears the local
    /// session on success. Returns whether the deletion happened.
    pub async fn delete_account(&self) -> Result<bool> {
        let confirmed = self
            .dialogs
            .confirm("Delete your account? This cannot be undone.")
            .await;
        if !confirmed {
            return Ok(false);
        }

        self.client.auth().delete_account().await.map_err(|err| {
            warn!(error = %err, "Failed to delete account");
            ViewError::from_api(&err, "Could not delete your account.")
        })?;

        self.session.clear_session();
        Ok(true)
    }
}
