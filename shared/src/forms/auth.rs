use validator::Validate;

use super::rules::required;
use super::{text, FieldErrors, FormContext, FormSchema};
use crate::Credentials;

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "required", message = "Username is required"))]
    pub username: String,
    #[validate(custom(function = "required", message = "Password is required"))]
    pub password: String,
}

impl FormSchema for LoginForm {
    type Payload = Credentials;

    fn to_payload(&self, _ctx: &FormContext) -> Result<Credentials, FieldErrors> {
        // Passwords are sent exactly as typed.
        Ok(Credentials {
            username: text(&self.username),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::test_support::ctx;

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().check(&ctx()).unwrap_err();
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let credentials = LoginForm {
            username: " agent ".into(),
            password: " secret ".into(),
        }
        .check(&ctx())
        .unwrap();
        assert_eq!(credentials.username, "agent");
        assert_eq!(credentials.password, " secret ");
    }
}
