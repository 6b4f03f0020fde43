//! Datastore column datatypes
//!
//! Columns carry a numeric datatype code on the wire; this maps the codes to
//! a typed enum with the short names the console displays.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of information stored in a datastore column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    Int,
    Uint,
    Float,
    String,
    Blob,
    Time,
    /// Code not known to this version of the console
    Unknown(i64),
}

impl Datatype {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Int,
            1 => Self::Uint,
            2 => Self::Float,
            3 => Self::String,
            4 => Self::Blob,
            5 => Self::Time,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Int => 0,
            Self::Uint => 1,
            Self::Float => 2,
            Self::String => 3,
            Self::Blob => 4,
            Self::Time => 5,
            Self::Unknown(code) => code,
        }
    }

    /// Display name, `"?"` for unknown codes
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Blob => "blob",
            Self::Time => "time",
            Self::Unknown(_) => "?",
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Datatype {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for Datatype {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = i64::deserialize(deserializer)?;
        Ok(Self::from_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        let names: Vec<&str> = (0..6).map(|c| Datatype::from_code(c).name()).collect();
        assert_eq!(names, vec!["int", "uint", "float", "string", "blob", "time"]);
    }

    #[test]
    fn test_unknown_code_preserved() {
        let datatype = Datatype::from_code(42);
        assert_eq!(datatype, Datatype::Unknown(42));
        assert_eq!(datatype.code(), 42);
        assert_eq!(datatype.to_string(), "?");
    }

    #[test]
    fn test_serde_uses_numeric_code() {
        let datatype: Datatype = serde_json::from_str("2").unwrap();
        assert_eq!(datatype, Datatype::Float);
        assert_eq!(serde_json::to_string(&Datatype::Time).unwrap(), "5");
    }
}
