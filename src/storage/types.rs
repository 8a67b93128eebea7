use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Pdf,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Pdf => "pdf",
        }
    }

    /// Virtual directory uploaded files of this type are stored under.
    pub(crate) fn upload_dir(self) -> &'static str {
        match self {
            Self::Video => "uploads/videos",
            Self::Pdf => "uploads/documents",
        }
    }
}

/// Grade-level tag used to partition contents, quizzes, and students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassLevel {
    #[serde(rename = "5th")]
    Fifth,
    #[serde(rename = "6th")]
    Sixth,
    #[serde(rename = "7th")]
    Seventh,
    #[serde(rename = "8th")]
    Eighth,
    #[serde(rename = "9th")]
    Ninth,
    #[serde(rename = "10th")]
    Tenth,
}

impl ClassLevel {
    pub const ALL: [ClassLevel; 6] = [
        Self::Fifth,
        Self::Sixth,
        Self::Seventh,
        Self::Eighth,
        Self::Ninth,
        Self::Tenth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fifth => "5th",
            Self::Sixth => "6th",
            Self::Seventh => "7th",
            Self::Eighth => "8th",
            Self::Ninth => "9th",
            Self::Tenth => "10th",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|level| level.as_str() == value)
    }
}
