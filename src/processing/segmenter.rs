//! Heuristic section segmentation of raw resume text

use crate::processing::ats_matcher::find_known_skills;
use crate::processing::document::{ContactInfo, ParsedResume, SectionType};
use crate::processing::text_processor::TextProcessor;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const SKILL_MIN_CHARS: usize = 2;
const SKILL_MAX_CHARS: usize = 50;
const EXPERIENCE_MIN_CHARS: usize = 20;
const EDUCATION_MIN_CHARS: usize = 10;
const PROJECT_MIN_CHARS: usize = 20;

const SKILL_DELIMITERS: &[char] = &[',', ';', '•', '\n', '|'];
const BULLET_CHARS: &[char] = &['-', '*', '•', '·', '▪', '◦', '●', '–', '>'];

/// Header aliases per section. Every alias is its own rule, so a resume
/// with both "Skills" and "Technical Skills" contributes both blocks.
const HEADER_ALIASES: &[(SectionType, &[&str])] = &[
    (
        SectionType::Skills,
        &[
            "skills",
            "technical skills",
            "core competencies",
            "key skills",
            "competencies",
            "technologies",
            "tech stack",
            "areas of expertise",
            "expertise",
        ],
    ),
    (
        SectionType::Experience,
        &[
            "experience",
            "professional experience",
            "work experience",
            "employment history",
            "work history",
            "employment",
            "career history",
        ],
    ),
    (
        SectionType::Education,
        &[
            "education",
            "academic background",
            "education and training",
            "academic qualifications",
            "qualifications",
        ],
    ),
    (
        SectionType::Projects,
        &["projects", "personal projects", "key projects", "selected projects", "side projects"],
    ),
    (
        SectionType::Summary,
        &["summary", "professional summary", "profile", "objective", "about me"],
    ),
    (
        SectionType::Certifications,
        &["certifications", "certificates", "licenses", "licenses and certifications"],
    ),
    (SectionType::Contact, &["contact", "contact information", "contact details"]),
    (
        SectionType::Other,
        &[
            "awards",
            "honors",
            "languages",
            "interests",
            "hobbies",
            "references",
            "publications",
            "volunteer experience",
            "volunteering",
        ],
    ),
];

/// One header pattern and the section it opens
struct HeaderRule {
    section: SectionType,
    pattern: Regex,
}

impl HeaderRule {
    /// Header alone on its line, with nothing after an optional colon.
    /// "Languages: Rust" inside a skills block is content, not a new section.
    fn matches_bare(&self, line: &str) -> bool {
        self.pattern
            .captures(line)
            .is_some_and(|caps| caps.name("rest").map_or(true, |rest| rest.as_str().trim().is_empty()))
    }
}

static HEADER_RULES: Lazy<Vec<HeaderRule>> = Lazy::new(|| {
    HEADER_ALIASES
        .iter()
        .flat_map(|(section, aliases)| {
            aliases.iter().map(move |alias| HeaderRule {
                section: *section,
                pattern: header_pattern(alias),
            })
        })
        .collect()
});

static JOB_ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[A-Z][A-Za-z&.']*\b.*\b(?:19|20)\d{2}\b").expect("Invalid job entry regex")
});
static BLANK_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Invalid blank line regex"));

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("Invalid email regex")
});
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{2,4}\)|\b\d{2,4})[\s.-]?\d{3,4}[\s.-]?\d{3,4}\b")
        .expect("Invalid phone regex")
});
static LINKEDIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)linkedin\.com/in/[A-Za-z0-9_-]+").expect("Invalid LinkedIn regex")
});
static GITHUB_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)github\.com/[A-Za-z0-9_-]+").expect("Invalid GitHub regex"));

fn header_pattern(alias: &str) -> Regex {
    // Whole line is the header, optionally decorated, optionally "Header: inline content"
    let source = format!(
        r"(?i)^[\s#*•=_-]*{}[\s*_=-]*(?::(?P<rest>.*))?$",
        regex::escape(alias).replace(' ', r"\s+")
    );
    Regex::new(&source).expect("Invalid header pattern")
}

/// A block of text that followed one header occurrence
#[derive(Debug, Clone)]
struct Capture {
    section: SectionType,
    header_line: usize,
    text: String,
}

pub struct SectionSegmenter {
    text_processor: TextProcessor,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    pub fn new() -> Self {
        Self {
            text_processor: TextProcessor::new(),
        }
    }

    /// Split raw text into a `ParsedResume`.
    ///
    /// Never fails: text without recognizable structure yields empty
    /// sections, which the scorers report as a poor-structure signal.
    pub fn segment(&self, text: &str) -> ParsedResume {
        let content = self.text_processor.normalize(text);
        let lines: Vec<&str> = content.lines().collect();
        let captures = self.capture_sections(&lines);

        let skills = self.parse_skills(&captures, &content);
        let experience = self.parse_experience(&captures);
        let education = self.parse_education(&captures);
        let projects = self.parse_projects(&captures);
        let contact_info = self.extract_contact_info(&content);

        let resume = ParsedResume {
            content,
            skills,
            experience,
            education,
            projects,
            contact_info,
        };

        if resume.has_no_sections() {
            warn!("No resume sections detected; input may be unstructured");
        } else {
            debug!(
                "Segmented resume: {} skills, {} experience entries, {} education lines, {} projects",
                resume.skills.len(),
                resume.experience.len(),
                resume.education.len(),
                resume.projects.len()
            );
        }

        resume
    }

    /// For every header rule, capture from its first matching line up to the
    /// next bare header of any kind. Inline "Header: content" lines open a
    /// capture but never end one.
    fn capture_sections(&self, lines: &[&str]) -> Vec<Capture> {
        let header_lines: Vec<bool> = lines
            .iter()
            .map(|line| HEADER_RULES.iter().any(|rule| rule.matches_bare(line)))
            .collect();

        let mut captures: Vec<Capture> = Vec::new();

        for rule in HEADER_RULES.iter() {
            let Some((line_idx, caps)) = lines
                .iter()
                .enumerate()
                .find_map(|(idx, line)| rule.pattern.captures(line).map(|c| (idx, c)))
            else {
                continue;
            };

            // Two aliases can resolve to the same header line
            if captures
                .iter()
                .any(|c| c.section == rule.section && c.header_line == line_idx)
            {
                continue;
            }

            let mut block: Vec<&str> = Vec::new();
            if let Some(rest) = caps.name("rest") {
                let rest = rest.as_str().trim();
                if !rest.is_empty() {
                    block.push(rest);
                }
            }

            block.extend(
                lines
                    .iter()
                    .enumerate()
                    .skip(line_idx + 1)
                    .take_while(|(idx, _)| !header_lines[*idx])
                    .map(|(_, line)| *line),
            );

            captures.push(Capture {
                section: rule.section,
                header_line: line_idx,
                text: block.join("\n"),
            });
        }

        captures.sort_by_key(|c| c.header_line);
        captures
    }

    fn section_blocks<'a>(&self, captures: &'a [Capture], section: SectionType) -> impl Iterator<Item = &'a str> {
        captures
            .iter()
            .filter(move |c| c.section == section)
            .map(|c| c.text.as_str())
    }

    fn parse_skills(&self, captures: &[Capture], content: &str) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut skills = Vec::new();

        for block in self.section_blocks(captures, SectionType::Skills) {
            for fragment in block.split(SKILL_DELIMITERS) {
                // "Languages: Rust" keeps only the part after the label
                let fragment = fragment.rsplit(':').next().unwrap_or(fragment);
                let skill = strip_bullet(fragment).trim_end_matches('.').trim();

                let len = skill.chars().count();
                if !(SKILL_MIN_CHARS..=SKILL_MAX_CHARS).contains(&len) {
                    continue;
                }
                if seen.insert(skill.to_lowercase()) {
                    skills.push(skill.to_string());
                }
            }
        }

        for skill in find_known_skills(content) {
            if seen.insert(skill.to_lowercase()) {
                skills.push(skill);
            }
        }

        skills
    }

    fn parse_experience(&self, captures: &[Capture]) -> Vec<String> {
        let mut entries = Vec::new();

        for block in self.section_blocks(captures, SectionType::Experience) {
            let mut current: Vec<&str> = Vec::new();

            for line in block.lines() {
                if JOB_ENTRY_REGEX.is_match(line) && !current.is_empty() {
                    entries.push(current.join("\n"));
                    current.clear();
                }
                current.push(line);
            }
            if !current.is_empty() {
                entries.push(current.join("\n"));
            }
        }

        entries
            .into_iter()
            .map(|entry| entry.trim().to_string())
            .filter(|entry| entry.chars().count() >= EXPERIENCE_MIN_CHARS)
            .collect()
    }

    fn parse_education(&self, captures: &[Capture]) -> Vec<String> {
        self.section_blocks(captures, SectionType::Education)
            .flat_map(|block| block.lines())
            .map(|line| strip_bullet(line).to_string())
            .filter(|line| line.chars().count() >= EDUCATION_MIN_CHARS)
            .collect()
    }

    fn parse_projects(&self, captures: &[Capture]) -> Vec<String> {
        self.section_blocks(captures, SectionType::Projects)
            .flat_map(|block| BLANK_LINE_REGEX.split(block).collect::<Vec<_>>())
            .map(|paragraph| paragraph.trim().to_string())
            .filter(|paragraph| paragraph.chars().count() >= PROJECT_MIN_CHARS)
            .collect()
    }

    pub fn extract_contact_info(&self, content: &str) -> ContactInfo {
        let first = |regex: &Regex| regex.find(content).map(|m| m.as_str().trim().to_string());

        ContactInfo {
            email: first(&EMAIL_REGEX),
            phone: first(&PHONE_REGEX),
            linkedin: first(&LINKEDIN_REGEX),
            github: first(&GITHUB_REGEX),
        }
    }
}

fn strip_bullet(text: &str) -> &str {
    text.trim().trim_start_matches(BULLET_CHARS).trim()
}
