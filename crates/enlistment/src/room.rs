//! Rooms and their seating capacity.

use serde::Serialize;
use std::fmt;

use crate::error::{EnlistmentError, Result};
use crate::ids::RoomName;

/// A physical room with a fixed seating capacity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Room {
    name: RoomName,
    capacity: u32,
}

impl Room {
    /// Creates a room, rejecting a non-alphanumeric name or a zero capacity.
    pub fn new(name: impl Into<String>, capacity: u32) -> Result<Self> {
        let name = name.into();
        let invalid = |name: String, reason: &str| EnlistmentError::InvalidRoom {
            name,
            reason: reason.to_string(),
        };

        if capacity == 0 {
            return Err(invalid(name, "capacity must be positive"));
        }

        let name = RoomName::new(name.clone())
            .map_err(|_| invalid(name, "name must be alphanumeric"))?;

        Ok(Self { name, capacity })
    }

    pub fn name(&self) -> &RoomName {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (capacity {})", self.name, self.capacity)
    }
}
