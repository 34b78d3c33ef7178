//! Presentation notices.
//!
//! The engine never renders or plays anything itself. It pushes `Notice`
//! values into an outbox that the host drains with
//! [`PoolGame::drain_notices`](super::PoolGame::drain_notices) and hands
//! to whatever draws the table.

use serde::{Deserialize, Serialize};

use crate::core::{BallId, ClientId, PocketId};
use crate::round::RoundKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    /// A line in the event feed, attributed to `client`.
    Toast {
        client: ClientId,
        message: String,
        icon: String,
    },
    /// Play a sound cue at a ball.
    Sound { cue: String, ball: BallId },
    /// A ball looks like it will drop. Cosmetic only.
    AnticipatePot { ball: BallId, pocket: PocketId },
    /// Change the simulation speed multiplier.
    TimeScale(f32),
    /// The shot clock ran out and `client` lost control of aiming.
    AimForfeited { client: ClientId },
    /// Whole seconds left on the shot clock.
    ShotClock { seconds: u32 },
    RoundChanged { round: RoundKind },
}

impl Notice {
    pub fn toast(client: ClientId, message: impl Into<String>, icon: impl Into<String>) -> Self {
        Notice::Toast {
            client,
            message: message.into(),
            icon: icon.into(),
        }
    }
}
