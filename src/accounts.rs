//! accounts (Account Directory): регистрация и вход.
//!
//! Уникальность username: точное совпадение с учётом регистра.
//! Без хэширования паролей, rate limiting и блокировок.

use log::{debug, info};

use crate::error::{HotelError, HotelResult};
use crate::model::Account;
use crate::session::Session;
use crate::store::{Backend, Store};
use crate::util::now_local;

pub struct AccountDirectory<'a, B: Backend> {
    store: &'a mut Store<B>,
}

impl<'a, B: Backend> AccountDirectory<'a, B> {
    pub fn new(store: &'a mut Store<B>) -> Self {
        Self { store }
    }

    /// Create an account. On `UsernameTaken` nothing is written.
    pub fn signup(
        &mut self,
        username: &str,
        password: &str,
        name: &str,
        email: &str,
        phone: &str,
    ) -> HotelResult<Account> {
        let mut accounts = self.store.load::<Account>();
        if accounts.contains_key(username) {
            return Err(HotelError::UsernameTaken(username.to_string()));
        }

        let account = Account {
            password: password.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            created_at: now_local(),
        };
        accounts.insert(username.to_string(), account.clone());
        self.store.save(&accounts)?;

        info!("signup: account '{}' created", username);
        Ok(account)
    }

    pub fn login(&mut self, username: &str, password: &str) -> HotelResult<Session> {
        let accounts = self.store.load::<Account>();
        match accounts.get(username) {
            Some(a) if a.password == password => {
                debug!("login: '{}' authenticated", username);
                Ok(Session::new(username))
            }
            _ => Err(HotelError::InvalidCredentials),
        }
    }

    pub fn get(&mut self, username: &str) -> Option<Account> {
        self.store.load::<Account>().shift_remove(username)
    }

    pub fn count(&mut self) -> usize {
        self.store.load::<Account>().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBackend, StoreOptions};

    fn store() -> Store<MemoryBackend> {
        Store::new(MemoryBackend::new(), StoreOptions::default())
    }

    #[test]
    fn signup_then_login() {
        let mut s = store();
        let mut dir = AccountDirectory::new(&mut s);
        dir.signup("alice", "pw", "Alice A", "a@x.com", "555").unwrap();
        let session = dir.login("alice", "pw").unwrap();
        assert_eq!(session.username(), "alice");
        let a = dir.get("alice").expect("stored");
        assert_eq!(a.password, "pw");
        assert_eq!(a.name, "Alice A");
    }

    #[test]
    fn login_is_exact_and_case_sensitive() {
        let mut s = store();
        let mut dir = AccountDirectory::new(&mut s);
        dir.signup("Bob", "Secret", "Bob", "b@x.com", "1").unwrap();
        assert!(dir.login("Bob", "Secret").is_ok());
        for (u, p) in [("bob", "Secret"), ("Bob", "secret"), ("Bob", "Secret "), ("nobody", "")] {
            assert!(
                matches!(dir.login(u, p), Err(HotelError::InvalidCredentials)),
                "{u}/{p} must not authenticate"
            );
        }
    }

    #[test]
    fn usernames_differing_in_case_are_distinct() {
        let mut s = store();
        let mut dir = AccountDirectory::new(&mut s);
        dir.signup("carol", "1", "C", "", "").unwrap();
        dir.signup("Carol", "2", "C2", "", "").unwrap();
        assert_eq!(dir.count(), 2);
    }
}
