use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The prerequisite of a course: nothing, or exactly one other course code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Prerequisite {
    #[default]
    None,
    Course(String),
}

impl Prerequisite {
    /// Sentinel used in catalog files and exports for "no prerequisite".
    pub const NONE_LABEL: &'static str = "None";

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::NONE_LABEL) {
            Prerequisite::None
        } else {
            Prerequisite::Course(trimmed.to_string())
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Prerequisite::None => None,
            Prerequisite::Course(code) => Some(code),
        }
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerequisite::None => f.write_str(Self::NONE_LABEL),
            Prerequisite::Course(code) => f.write_str(code),
        }
    }
}

impl Serialize for Prerequisite {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Prerequisite {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Prerequisite::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub description: String,
    pub credits: u8,
    #[serde(default)]
    pub prerequisite: Prerequisite,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        credits: u8,
        prerequisite: Prerequisite,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: description.into(),
            credits,
            prerequisite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Department {
    pub fn new(name: impl Into<String>, courses: Vec<Course>) -> Self {
        Self {
            name: name.into(),
            courses,
        }
    }
}

/// A course together with the department that owns it, borrowed from the
/// catalog store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub department: &'a str,
    pub course: &'a Course,
}

impl<'a> CatalogEntry<'a> {
    pub fn new(department: &'a str, course: &'a Course) -> Self {
        Self { department, course }
    }

    pub fn code(&self) -> &'a str {
        &self.course.code
    }

    /// Label shown in the course picker, e.g. `AE101: Intro to Rocket Design (Department of Aerospace Engineering)`.
    pub fn picker_label(&self) -> String {
        format!(
            "{}: {} ({})",
            self.course.code, self.course.name, self.department
        )
    }
}

impl Serialize for CatalogEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CatalogEntry", 6)?;
        state.serialize_field("department", self.department)?;
        state.serialize_field("code", &self.course.code)?;
        state.serialize_field("name", &self.course.name)?;
        state.serialize_field("description", &self.course.description)?;
        state.serialize_field("credits", &self.course.credits)?;
        state.serialize_field("prerequisite", &self.course.prerequisite)?;
        state.end()
    }
}
