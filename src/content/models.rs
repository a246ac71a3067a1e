//! Content data models
//!
//! Subjects with their units, and placement/DSA problems. Subject documents
//! have historically stored the `units` field both as a native JSON array
//! and as a serialized JSON string; the deserializer accepts either shape.

use serde::{Deserialize, Deserializer, Serialize};

/// One unit of a subject's syllabus
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    /// Unit identifier; stored as a number in older documents
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Unit title
    pub title: String,
    /// Short description of the unit's content
    #[serde(default)]
    pub description: String,
    /// Object-store id of the attached PDF notes, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_file_id: Option<String>,
}

/// An academic subject with its syllabus units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    /// Document id
    pub id: String,
    /// Subject name
    pub name: String,
    /// Subject code, e.g. KCS-401
    pub code: String,
    /// Semester number
    pub semester: u8,
    /// Syllabus units; tolerates both native-array and stringified storage
    #[serde(default, deserialize_with = "units_field")]
    pub units: Vec<Unit>,
}

/// Placement problem difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Warm-up level
    Easy,
    /// Standard interview level
    Medium,
    /// Advanced level
    Hard,
}

/// A placement/DSA practice problem
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Problem {
    /// Document id
    pub id: String,
    /// Problem title
    pub title: String,
    /// Difficulty bucket
    pub difficulty: Difficulty,
    /// Companies known to ask this problem
    #[serde(default)]
    pub companies: Vec<String>,
    /// Topic tag, e.g. "Dynamic Programming"
    pub topic: String,
    /// External link to the problem statement
    pub link: String,
}

/// Accept a string or a number for an id field
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

/// Accept `units` as a native array or as a serialized JSON string
fn units_field<'de, D>(deserializer: D) -> Result<Vec<Unit>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum UnitsField {
        Native(Vec<Unit>),
        Serialized(String),
    }

    match UnitsField::deserialize(deserializer)? {
        UnitsField::Native(units) => Ok(units),
        UnitsField::Serialized(raw) => {
            serde_json::from_str(&raw).map_err(serde::de::Error::custom)
        }
    }
}
