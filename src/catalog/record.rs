//! Course record and language code mapping.

use serde::{Deserialize, Serialize};

/// A language a course is released in.
///
/// The catalog stores languages as numeric codes. Codes outside the known
/// set map to [`Language::Unknown`] instead of failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Hindi,
    Kannada,
    Malayalam,
    Tamil,
    Telugu,
    English,
    Unknown,
}

impl Language {
    /// Map a single catalog language code.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "6" => Language::Hindi,
            "7" => Language::Kannada,
            "11" => Language::Malayalam,
            "20" => Language::Tamil,
            "21" => Language::Telugu,
            "24" => Language::English,
            _ => Language::Unknown,
        }
    }

    /// Parse a comma-separated code list such as `"6, 24"`.
    ///
    /// Every comma-separated entry yields exactly one language, so an empty
    /// field produces a single `Unknown`.
    pub fn parse_list(codes: &str) -> Vec<Language> {
        codes.split(',').map(Language::from_code).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Hindi => "Hindi",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::English => "English",
            Language::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the course catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course title.
    pub title: String,
    /// Free-text description of the course.
    pub about: String,
    /// Who the course is for.
    pub audience: String,
    /// Languages the course is released in.
    pub languages: Vec<Language>,
}

impl CourseRecord {
    pub fn new(title: &str, about: &str, audience: &str, language_codes: &str) -> Self {
        Self {
            title: title.to_string(),
            about: about.to_string(),
            audience: audience.to_string(),
            languages: Language::parse_list(language_codes),
        }
    }

    /// Languages joined for display, e.g. `"Hindi, English"`.
    pub fn language_names(&self) -> String {
        self.languages
            .iter()
            .map(Language::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The labeled text blob that gets chunked and embedded.
    pub fn combined_text(&self) -> String {
        format!(
            "Course Title: {}; About Course: {}; Target Audience: {}; Available Languages: {}",
            self.title,
            self.about,
            self.audience,
            self.language_names()
        )
    }

    /// Whether any of the record's language codes was unrecognized.
    pub fn has_unknown_language(&self) -> bool {
        self.languages.contains(&Language::Unknown)
    }
}
