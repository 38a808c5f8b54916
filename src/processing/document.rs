//! Document structures shared by the segmenter and the scorers

use serde::{Deserialize, Serialize};

/// A resume split into the sections the scorers care about.
///
/// Built once per upload by the segmenter (or supplied directly by a caller
/// that already has structured data) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedResume {
    /// Full normalized text
    pub content: String,
    /// Skills in first-seen display form, unique ignoring case
    pub skills: Vec<String>,
    /// One block per detected job entry, in document order
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub projects: Vec<String>,
    #[serde(default)]
    pub contact_info: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// The target job posting for one analysis call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobDescriptionInput {
    pub description: String,
    /// Order is the reporting priority
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    Skills,
    Experience,
    Education,
    Projects,
    Summary,
    Certifications,
    Contact,
    Other,
}

impl ParsedResume {
    /// Experience blocks joined into one narrative.
    pub fn experience_text(&self) -> String {
        self.experience.join("\n")
    }

    /// True when segmentation found no structure at all.
    ///
    /// This is a "poor structure" signal for the caller, not a failure.
    pub fn has_no_sections(&self) -> bool {
        self.skills.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.projects.is_empty()
    }
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.linkedin.is_none() && self.github.is_none()
    }
}

impl JobDescriptionInput {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_required_skills<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_preferred_skills<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.preferred_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Skills => write!(f, "Skills"),
            SectionType::Experience => write!(f, "Experience"),
            SectionType::Education => write!(f, "Education"),
            SectionType::Projects => write!(f, "Projects"),
            SectionType::Summary => write!(f, "Summary"),
            SectionType::Certifications => write!(f, "Certifications"),
            SectionType::Contact => write!(f, "Contact"),
            SectionType::Other => write!(f, "Other"),
        }
    }
}
