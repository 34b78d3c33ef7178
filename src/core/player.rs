//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! A pool round always seats exactly two players. `PlayerId` is the seat
//! index (0 or 1), not the participant's session identity; that lives on
//! [`crate::round::Player::client`].
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier for one of the two players in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Seat one (the winner-stays-on seat).
    pub const ONE: PlayerId = PlayerId(0);
    /// Seat two.
    pub const TWO: PlayerId = PlayerId(1);

    /// Create a seat ID. Returns `None` for anything but 0 or 1.
    #[must_use]
    pub const fn new(seat: u8) -> Option<Self> {
        if seat < 2 {
            Some(Self(seat))
        } else {
            None
        }
    }

    /// Get the seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    ///
    /// ```
    /// use pool_rules::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::ONE.opponent(), PlayerId::TWO);
    /// assert_eq!(PlayerId::TWO.opponent(), PlayerId::ONE);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats, in order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0 + 1)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use pool_rules::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<u32> = PlayerMap::with_value(0);
/// score[PlayerId::TWO] += 3;
/// assert_eq!(score[PlayerId::ONE], 0);
/// assert_eq!(score[PlayerId::TWO], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a map from explicit per-seat values.
    pub fn from_pair(one: T, two: T) -> Self {
        Self { data: [one, two] }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Mutable access to both entries at once, current seat first.
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let [one, two] = &mut self.data;
        if player == PlayerId::ONE {
            (one, two)
        } else {
            (two, one)
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::both().zip(self.data.iter_mut())
    }

    /// Find the first seat whose value matches the predicate.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<PlayerId> {
        self.iter().find(|(_, v)| predicate(v)).map(|(p, _)| p)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ONE.index(), 0);
        assert_eq!(PlayerId::TWO.index(), 1);
        assert_eq!(PlayerId::new(1), Some(PlayerId::TWO));
        assert_eq!(PlayerId::new(2), None);
        assert_eq!(format!("{}", PlayerId::ONE), "Seat 1");
    }

    #[test]
    fn test_opponent_is_involution() {
        for p in PlayerId::both() {
            assert_ne!(p, p.opponent());
            assert_eq!(p, p.opponent().opponent());
        }
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[PlayerId::ONE], 0);
        assert_eq!(map[PlayerId::TWO], 10);
    }

    #[test]
    fn test_pair_mut_orders_current_first() {
        let mut map = PlayerMap::from_pair("a".to_string(), "b".to_string());

        let (current, other) = map.pair_mut(PlayerId::TWO);
        current.push('!');
        other.push('?');

        assert_eq!(map[PlayerId::ONE], "a?");
        assert_eq!(map[PlayerId::TWO], "b!");
    }

    #[test]
    fn test_find() {
        let map = PlayerMap::from_pair(3, 7);
        assert_eq!(map.find(|v| *v == 7), Some(PlayerId::TWO));
        assert_eq!(map.find(|v| *v == 9), None);
    }

    #[test]
    fn test_player_map_serialization() {
        let map = PlayerMap::from_pair(1, 2);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
