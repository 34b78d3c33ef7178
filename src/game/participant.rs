//! Connected sessions.

use serde::{Deserialize, Serialize};

use crate::core::ClientId;

/// A connected session, seated or spectating.
///
/// `identity_key` is the stable key ratings are stored under; `client` is
/// only valid for the current connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub client: ClientId,
    pub name: String,
    pub identity_key: String,
}

impl Participant {
    pub fn new(client: ClientId, name: impl Into<String>, identity_key: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            identity_key: identity_key.into(),
        }
    }
}
