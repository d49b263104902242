use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::commands::required_text;
use crate::{EngineError, ResultEngine, Role, User, users};

use super::{Engine, with_tx};

impl Engine {
    /// Check a login. Unknown email and wrong password fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = email.trim().to_lowercase();
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .filter(|m| m.password == password)
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))?;
        User::try_from(model)
    }

    /// Add a user. Emails are stored lowercased and must be unique.
    pub async fn new_user(&self, email: &str, password: &str, role: Role) -> ResultEngine<User> {
        let email = required_text(email, "email")?.to_lowercase();
        if password.is_empty() {
            return Err(EngineError::InvalidField(
                "password must not be empty".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let exists = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(email));
            }

            let model = users::ActiveModel {
                uid: ActiveValue::NotSet,
                email: ActiveValue::Set(email.clone()),
                password: ActiveValue::Set(password.to_string()),
                role: ActiveValue::Set(role.as_str().to_string()),
            }
            .insert(&db_tx)
            .await?;
            User::try_from(model)
        })
    }
}
