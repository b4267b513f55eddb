use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, User, users};

use super::{Engine, normalize_required_name, with_tx};

fn validate_password(password: &str) -> ResultEngine<()> {
    if password.chars().count() < 8 {
        return Err(EngineError::InvalidPassword(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(EngineError::InvalidPassword(
            "password must contain a lowercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(EngineError::InvalidPassword(
            "password must contain an uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(EngineError::InvalidPassword(
            "password must contain a digit".to_string(),
        ));
    }
    Ok(())
}

impl Engine {
    /// Registers a new account and returns it with the verification code the
    /// caller is expected to deliver out of band.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<(User, String)> {
        let username = normalize_required_name(username, "user")?;
        let email = normalize_required_name(email, "email")?.to_lowercase();
        validate_password(password)?;
        let password_hash = hash(password, DEFAULT_COST)?;
        let verification_code = Uuid::new_v4().to_string();

        with_tx!(self, |db_tx| {
            let existing = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(email.clone()));
            }

            let active = users::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                username: ActiveValue::Set(username.clone()),
                email: ActiveValue::Set(email.clone()),
                password_hash: ActiveValue::Set(password_hash.clone()),
                balance_minor: ActiveValue::Set(0),
                bonus_minor: ActiveValue::Set(0),
                token: ActiveValue::Set(None),
                verification_code: ActiveValue::Set(Some(verification_code.clone())),
                verified: ActiveValue::Set(false),
                created_at: ActiveValue::Set(Utc::now()),
            };
            let inserted = active.insert(&db_tx).await?;
            Ok((User::from(inserted), verification_code.clone()))
        })
    }

    /// Marks the account verified when the presented code matches.
    pub async fn verify_email(&self, email: &str, code: &str) -> ResultEngine<User> {
        let email = email.trim().to_lowercase();
        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

            if model.verified {
                return Err(EngineError::ExistingKey(email.clone()));
            }
            if model.verification_code.as_deref() != Some(code) {
                return Err(EngineError::Unauthorized(
                    "invalid verification code".to_string(),
                ));
            }

            let mut active: users::ActiveModel = model.into();
            active.verified = ActiveValue::Set(true);
            active.verification_code = ActiveValue::Set(None);
            let updated = active.update(&db_tx).await?;
            Ok(User::from(updated))
        })
    }

    /// Checks the credentials and issues a fresh bearer token, replacing any
    /// previously issued one.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<String> {
        let email = email.trim().to_lowercase();
        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::Unauthorized("invalid credentials".to_string()))?;

            if !verify(password, &model.password_hash)? {
                return Err(EngineError::Unauthorized("invalid credentials".to_string()));
            }
            if !model.verified {
                return Err(EngineError::Unauthorized(
                    "account not verified".to_string(),
                ));
            }

            let token = Uuid::new_v4().to_string();
            let mut active: users::ActiveModel = model.into();
            active.token = ActiveValue::Set(Some(token.clone()));
            active.update(&db_tx).await?;
            Ok(token)
        })
    }

    /// Resolves a bearer token back to its user.
    pub async fn user_by_token(&self, token: &str) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Token.eq(token))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::Unauthorized("invalid token".to_string()))?;
            Ok(User::from(model))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_policy_accepts_strong_password() {
        assert!(validate_password("Sup3rSecret").is_ok());
    }

    #[test]
    fn password_policy_rejects_weak_passwords() {
        for password in ["Sh0rt", "alllower1", "ALLUPPER1", "NoDigitsHere"] {
            assert!(matches!(
                validate_password(password),
                Err(EngineError::InvalidPassword(_))
            ));
        }
    }
}
