use crate::domain::errors::DomainError;

const CNT_TAG_NAME: &str = "tags_name_key";
const CNT_CERTIFICATE_NAME_DESCRIPTION: &str = "certificates_name_description_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_ORDER_USER: &str = "orders_user_id_fkey";
pub(crate) const CNT_ORDER_CERTIFICATE: &str = "order_certificates_certificate_id_fkey";
const CNT_CERTIFICATE_PRICE: &str = "certificates_price_chk";
const CNT_CERTIFICATE_DURATION: &str = "certificates_duration_chk";

pub(crate) fn constraint_name(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_TAG_NAME => DomainError::conflict("tag name already exists"),
                    CNT_CERTIFICATE_NAME_DESCRIPTION => DomainError::conflict(
                        "certificate with the same name and description already exists",
                    ),
                    CNT_USER_EMAIL => DomainError::conflict("e-mail already registered"),
                    CNT_ORDER_USER => DomainError::not_found("user not found"),
                    // Delete direction; order inserts map this themselves.
                    CNT_ORDER_CERTIFICATE => {
                        DomainError::conflict("certificate is referenced by existing orders")
                    }
                    CNT_CERTIFICATE_PRICE => {
                        DomainError::validation("price must be between 0.00 and 10000.00")
                    }
                    CNT_CERTIFICATE_DURATION => {
                        DomainError::validation("duration must be between 1 and 180 days")
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => return DomainError::conflict("unique constraint violated"),
                    "23503" => return DomainError::not_found("referenced record not found"),
                    "23514" => return DomainError::validation("check constraint violated"),
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
