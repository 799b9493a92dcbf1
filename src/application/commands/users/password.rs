pub(super) const MIN_PASSWORD_LENGTH: usize = 3;
pub(super) const MAX_PASSWORD_LENGTH: usize = 10;

pub(super) fn is_password_valid(password: &str) -> bool {
    let len = password.chars().count();
    (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len)
}
