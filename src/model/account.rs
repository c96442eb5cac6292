use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{CollectionKind, Record};
use crate::util::timestamp;

/// Учётная запись. Ключ коллекции: username (регистр важен).
/// Пароль хранится открытым текстом: так задумано, это не баг.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl Record for Account {
    const KIND: CollectionKind = CollectionKind::Accounts;
}
