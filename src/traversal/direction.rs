//! Hop direction codes

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Direction of an edge hop.
///
/// Serialized as the integer code understood by the graph service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow edges from source to target (code 0)
    Out,
    /// Follow edges from target to source (code 1)
    In,
    /// Follow edges either way (code 2)
    Both,
}

impl Direction {
    pub fn code(self) -> u8 {
        match self {
            Direction::Out => 0,
            Direction::In => 1,
            Direction::Both => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Out),
            1 => Some(Direction::In),
            2 => Some(Direction::Both),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Out => "out",
            Direction::In => "in",
            Direction::Both => "both",
        };
        f.write_str(name)
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Direction::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown direction code {}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_codes() {
        assert_eq!(Direction::Out.code(), 0);
        assert_eq!(Direction::In.code(), 1);
        assert_eq!(Direction::Both.code(), 2);
        assert_eq!(Direction::from_code(3), None);
    }

    #[test]
    fn test_direction_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Direction::In).unwrap(), "1");
        let dir: Direction = serde_json::from_str("2").unwrap();
        assert_eq!(dir, Direction::Both);
        assert!(serde_json::from_str::<Direction>("7").is_err());
    }
}
