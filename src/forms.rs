use std::collections::BTreeMap;

use axum::{
    extract::{Form, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use sea_orm::{IntoActiveModel, Set};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::entities::review;

const REQUIRED: &str = "This field is required.";

/// Field-level messages for re-displaying a rejected form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| e.message.as_deref().unwrap_or("Enter a valid value.").to_string())
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        Self { fields, non_field: Vec::new() }
    }
}

/// Submitted review content. Extra multipart-style fields are ignored.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct ReviewForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub message: String,
}

impl ReviewForm {
    pub fn from_review(review: &review::Model) -> Self {
        Self { message: review.message.clone() }
    }

    /// Validates the input and binds it onto a review.
    ///
    /// Without `existing` the result is a fresh row whose author and movie are
    /// still unset; with it, the existing row carrying the new message.
    pub fn bind(
        mut self,
        existing: Option<review::Model>,
    ) -> Result<review::ActiveModel, FormErrors> {
        self.message = self.message.trim().to_string();
        self.validate()?;

        let mut model = match existing {
            Some(review) => review.into_active_model(),
            None => review::ActiveModel::default(),
        };
        model.message = Set(self.message);
        Ok(model)
    }
}

/// A review form posted either url-encoded or as `multipart/form-data`.
/// Multipart bodies contribute their `message` part; file parts are skipped.
#[derive(Clone, Debug)]
pub struct ReviewSubmission(pub ReviewForm);

impl<S> FromRequest<S> for ReviewSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !multipart {
            let Form(form) =
                Form::<ReviewForm>::from_request(req, state).await.map_err(|e| e.into_response())?;
            return Ok(Self(form));
        }

        let mut parts =
            Multipart::from_request(req, state).await.map_err(|e| e.into_response())?;
        let mut form = ReviewForm::default();
        while let Some(field) = parts.next_field().await.map_err(|e| e.into_response())? {
            if field.name() == Some("message") {
                form.message = field.text().await.map_err(|e| e.into_response())?;
            }
        }
        Ok(Self(form))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.username.trim().is_empty() {
            errors.fields.entry("username".to_string()).or_default().push(REQUIRED.to_string());
        }
        if self.password.is_empty() {
            errors.fields.entry("password".to_string()).or_default().push(REQUIRED.to_string());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::ActiveValue;

    use super::*;

    fn stored() -> review::Model {
        review::Model {
            id: 4,
            author_id: 2,
            movie_id: 9,
            message: "old".to_string(),
            created_at: 100,
            updated_at: 100,
        }
    }

    #[test]
    fn test_bind_new_review_leaves_author_and_movie_unset() {
        let form = ReviewForm { message: "  잘 봤습니다  ".to_string() };
        let model = form.bind(None).unwrap();
        assert!(matches!(&model.message, ActiveValue::Set(m) if m == "잘 봤습니다"));
        assert!(model.author_id.is_not_set());
        assert!(model.movie_id.is_not_set());
        assert!(model.id.is_not_set());
    }

    #[test]
    fn test_bind_existing_review_updates_message_only() {
        let form = ReviewForm { message: "new take".to_string() };
        let model = form.bind(Some(stored())).unwrap();
        assert!(matches!(&model.message, ActiveValue::Set(m) if m == "new take"));
        assert!(matches!(model.id, ActiveValue::Unchanged(4)));
        assert!(matches!(model.author_id, ActiveValue::Unchanged(2)));
        assert!(matches!(model.movie_id, ActiveValue::Unchanged(9)));
    }

    #[test]
    fn test_bind_rejects_blank_message() {
        let errors = ReviewForm { message: "   ".to_string() }.bind(Some(stored())).unwrap_err();
        assert_eq!(errors.field("message"), [REQUIRED.to_string()]);
        assert!(errors.field("other").is_empty());
    }

    #[test]
    fn test_review_form_ignores_unknown_fields() {
        let form: ReviewForm =
            serde_json::from_str(r#"{"message":"hi","photo":"x.png"}"#).unwrap();
        assert_eq!(form.message, "hi");
    }

    #[test]
    fn test_login_form_requires_both_fields() {
        let errors = LoginForm::default().check().unwrap_err();
        assert_eq!(errors.field("username").len(), 1);
        assert_eq!(errors.field("password").len(), 1);
        let ok = LoginForm {
            username: "kim".to_string(),
            password: "pw".to_string(),
            next: None,
        };
        assert!(ok.check().is_ok());
    }
}
