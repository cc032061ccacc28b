use validator::Validate;

use super::rules::{known_role, optional_phone, required, USERNAME_RE};
use super::{choice, optional_text, text, FieldErrors, FormContext, FormSchema};
use crate::{User, UserPayload};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UserForm {
    #[validate(
        custom(function = "required", message = "Username is required"),
        length(max = 150, message = "Username is 150 characters max"),
        regex(path = "USERNAME_RE", message = "Letters, digits and @ . + - _ only")
    )]
    pub username: String,
    #[validate(
        custom(function = "required", message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    #[validate(custom(function = "required", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "required", message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        custom(function = "required", message = "Role is required"),
        custom = "known_role"
    )]
    pub role: String,
    #[validate(custom = "optional_phone")]
    pub phone_number: String,
    pub is_active: bool,
    pub password: String,
    pub confirm_password: String,
    /// Editing an existing user; the password becomes optional.
    pub editing: bool,
}

impl UserForm {
    pub fn blank() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }

    pub fn from_entity(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.as_str().to_string(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            is_active: user.is_active,
            password: String::new(),
            confirm_password: String::new(),
            editing: true,
        }
    }
}

impl FormSchema for UserForm {
    type Payload = UserPayload;

    fn refine(&self, _ctx: &FormContext, errors: &mut FieldErrors) {
        if self.password.is_empty() {
            if !self.editing {
                errors.insert("password", "Password is required");
            }
        } else if self.password.chars().count() < 8 {
            errors.insert("password", "Password must be at least 8 characters");
        } else if self.password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match");
        }
    }

    fn to_payload(&self, _ctx: &FormContext) -> Result<UserPayload, FieldErrors> {
        Ok(UserPayload {
            username: text(&self.username),
            email: text(&self.email),
            first_name: text(&self.first_name),
            last_name: text(&self.last_name),
            role: choice("role", &self.role)?,
            phone_number: optional_text(&self.phone_number),
            is_active: self.is_active,
            password: if self.password.is_empty() {
                None
            } else {
                Some(self.password.clone())
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::test_support::ctx;
    use crate::Role;

    fn valid_form() -> UserForm {
        UserForm {
            username: "agent.smith".into(),
            email: "smith@example.com".into(),
            first_name: "Agent".into(),
            last_name: "Smith".into(),
            role: "calling_agent".into(),
            password: "correct-horse".into(),
            confirm_password: "correct-horse".into(),
            ..UserForm::blank()
        }
    }

    #[test]
    fn test_create_requires_password() {
        let form = UserForm {
            password: String::new(),
            confirm_password: String::new(),
            ..valid_form()
        };
        let errors = form.check(&ctx()).unwrap_err();
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_edit_without_password_omits_it() {
        let form = UserForm {
            password: String::new(),
            confirm_password: String::new(),
            editing: true,
            ..valid_form()
        };
        let payload = form.check(&ctx()).unwrap();
        assert_eq!(payload.password, None);
        assert_eq!(payload.role, Role::CallingAgent);
    }

    #[test]
    fn test_password_confirmation() {
        let form = UserForm {
            confirm_password: "something-else".into(),
            ..valid_form()
        };
        let errors = form.check(&ctx()).unwrap_err();
        assert!(errors.contains("confirm_password"));
    }

    #[test]
    fn test_bad_email_and_role() {
        let form = UserForm {
            email: "smith".into(),
            role: "admin".into(),
            ..valid_form()
        };
        let errors = form.check(&ctx()).unwrap_err();
        assert!(errors.contains("email"));
        assert!(errors.contains("role"));
    }
}
