//! Domain error taxonomy.
//!
//! Every variant except `Storage` is an expected outcome the menu reports and
//! moves on from. `Storage` wraps infrastructure failures (save, lock, bootstrap).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HotelError {
    #[error("username '{0}' already exists")]
    UsernameTaken(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("room {0} does not exist")]
    RoomNotFound(String),

    #[error("room {0} is not available")]
    RoomUnavailable(String),

    #[error("booking {0} does not exist")]
    BookingNotFound(String),

    #[error("booking {0} does not belong to you")]
    NotOwner(String),

    #[error("booking {0} is already cancelled")]
    AlreadyCancelled(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl HotelError {
    /// True for outcomes that are not infrastructure failures.
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

pub type HotelResult<T> = std::result::Result<T, HotelError>;
