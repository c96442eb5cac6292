/// Authenticated identity for one logged-in user.
///
/// Only [`crate::accounts::AccountDirectory::login`] hands these out; every
/// ledger operation takes one explicitly. Dropping it is logging out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub(crate) fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
