//! Records describing the authenticated caller.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::ApiModel;

/// Identity carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TokenUser {
    pub id: String,
    pub email: String,
}

impl ApiModel for TokenUser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Password, User};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn loads_from_a_user_record_ignoring_extra_fields() {
        let user = User {
            id: 3,
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: Password::new("engine"),
        };
        let base = serde_json::to_value(&user).expect("dump succeeds");
        let token_user = TokenUser::load([base, json!({ "id": user.id.to_string() })])
            .expect("token user is valid");
        assert_eq!(token_user.id, "3");
        assert_eq!(token_user.email, "ada@example.com");
    }
}
