use super::{UserCommandService, password::is_password_valid};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult, InvalidFields},
    },
    domain::{
        user::{Email, NewUser, PasswordHash, PersonName},
        validation,
    },
};

#[derive(Debug, Clone, Default)]
pub struct RegisterUserCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserCommandService {
    /// Self-registration; new accounts always get the `USER` role.
    #[tracing::instrument(skip(self, command))]
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let RegisterUserCommand {
            first_name,
            last_name,
            email,
            password,
        } = command;

        let mut invalid = InvalidFields::new();
        check(&mut invalid, "first_name", first_name.as_deref(), validation::is_name);
        check(&mut invalid, "last_name", last_name.as_deref(), validation::is_name);
        check(&mut invalid, "email", email.as_deref(), validation::is_email);
        // The password value itself is never echoed back.
        if !password.as_deref().is_some_and(is_password_valid) {
            invalid.push("password", "***");
        }
        invalid.into_result()?;

        let (Some(first_name), Some(last_name), Some(email), Some(password)) =
            (first_name, last_name, email, password)
        else {
            return Err(ApplicationError::infrastructure(
                "registration fields passed validation while missing",
            ));
        };
        let email = Email::new(email)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(ApplicationError::duplicate(format!(
                "user with e-mail {email} already exists"
            )));
        }

        let hashed = self.password_hasher.hash(&password).await?;
        let new_user = NewUser::register(
            PersonName::new(first_name)?,
            PersonName::new(last_name)?,
            email,
            PasswordHash::new(hashed)?,
        );
        let user = self.user_repo.insert(new_user).await?;

        tracing::info!(user_id = user.id.0, "user registered");
        Ok(user.into())
    }
}

fn check(invalid: &mut InvalidFields, field: &str, value: Option<&str>, rule: fn(&str) -> bool) {
    if !value.is_some_and(rule) {
        invalid.push(field, value.unwrap_or("null"));
    }
}
