//! Skill normalization, fuzzy skill matching and known-skill detection

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use strsim::levenshtein;

/// Shorter skill must have at least this many characters for the substring rule
pub const MIN_SUBSTRING_LEN: usize = 3;

/// Edit-distance similarity must be strictly above this
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Groups of labels that denote the same skill
const SYNONYM_GROUPS: &[&[&str]] = &[
    &["javascript", "js", "ecmascript", "es6"],
    &["typescript", "ts"],
    &["node", "nodejs", "node.js"],
    &["postgresql", "postgres", "psql"],
    &["aws", "amazon web services"],
    &["gcp", "google cloud", "google cloud platform"],
    &["azure", "microsoft azure"],
    &["kubernetes", "k8s"],
    &["golang", "go"],
    &["react", "reactjs", "react.js"],
    &["vue", "vuejs", "vue.js"],
    &["angular", "angularjs"],
    &["nextjs", "next.js"],
    &["express", "expressjs", "express.js"],
    &["mongodb", "mongo"],
    &["sql server", "mssql", "ms sql"],
    &["c#", "csharp"],
    &["c++", "cpp"],
    &[".net", "dotnet"],
    &["objective-c", "objc"],
    &["ci/cd", "cicd", "continuous integration"],
    &["machine learning", "ml"],
    &["artificial intelligence", "ai"],
    &["natural language processing", "nlp"],
    &["scikit-learn", "sklearn"],
    &["rest", "restful", "rest api"],
    &["graphql", "gql"],
    &["user experience", "ux"],
    &["user interface", "ui"],
];

/// Pairs the substring rule would join although they are different skills
const DISTINCT_SKILLS: &[(&str, &str)] = &[("java", "javascript"), ("sql", "nosql")];

/// Vocabulary recovered from anywhere in a resume, in display form.
///
/// Single-letter languages (C, R) are left out: as bare words they match
/// initials and list markers far more often than the language.
const WELL_KNOWN_SKILLS: &[&str] = &[
    // Languages
    "Python", "JavaScript", "TypeScript", "Java", "C++", "C#", "Go", "Golang", "Rust", "Ruby",
    "PHP", "Swift", "Kotlin", "Scala", "Haskell", "Elixir", "Clojure", "Perl", "MATLAB", "SQL",
    "Bash", "Dart", "Objective-C",
    // Frameworks and libraries
    "React", "Angular", "Vue", "Svelte", "Next.js", "Node.js", "Express", "Django", "Flask",
    "FastAPI", "Spring", "Spring Boot", "Rails", "Laravel", ".NET", "jQuery", "Redux",
    "TensorFlow", "PyTorch", "Pandas", "NumPy", "scikit-learn", "Spark", "Hadoop",
    "HTML", "CSS", "Sass", "Tailwind", "Bootstrap", "GraphQL", "REST", "gRPC",
    // Databases
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "Cassandra", "DynamoDB",
    "SQLite", "Oracle", "SQL Server", "Neo4j", "Kafka", "RabbitMQ",
    // Cloud and DevOps
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins",
    "GitHub Actions", "GitLab", "CI/CD", "Linux", "Nginx", "Prometheus", "Grafana", "Git",
    // Practices
    "Agile", "Scrum", "Microservices", "Machine Learning", "Deep Learning", "Data Analysis",
    "Jira", "Figma",
];

static SYNONYM_INDEX: Lazy<HashMap<String, usize>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (group_id, group) in SYNONYM_GROUPS.iter().enumerate() {
        for label in group.iter() {
            index.insert(normalize(label), group_id);
        }
    }
    index
});

static DISTINCT_INDEX: Lazy<HashSet<(String, String)>> = Lazy::new(|| {
    DISTINCT_SKILLS
        .iter()
        .flat_map(|(a, b)| {
            let (a, b) = (normalize(a), normalize(b));
            [(a.clone(), b.clone()), (b, a)]
        })
        .collect()
});

static KNOWN_SKILL_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::Standard)
        .build(WELL_KNOWN_SKILLS)
        .expect("Known skill patterns are valid")
});

/// Which rule decided that two skill labels are the same skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Exact,
    Substring,
    Synonym,
    EditDistance,
}

/// Lower-case, trim and keep only letters, digits, space, `+`, `#` and `.`.
pub fn normalize(skill: &str) -> String {
    let kept: String = skill
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '+' | '#' | '.'))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decide whether two skill labels denote the same skill.
///
/// Rules run cheapest first: exact, substring, synonym table, edit distance.
/// The result does not depend on the argument order.
pub fn match_type(a: &str, b: &str) -> Option<MatchType> {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return None;
    }

    if a == b {
        return Some(MatchType::Exact);
    }

    if substring_match(&a, &b) {
        return Some(MatchType::Substring);
    }

    if let (Some(ga), Some(gb)) = (SYNONYM_INDEX.get(&a), SYNONYM_INDEX.get(&b)) {
        if ga == gb {
            return Some(MatchType::Synonym);
        }
    }

    if similarity(&a, &b) > SIMILARITY_THRESHOLD {
        return Some(MatchType::EditDistance);
    }

    None
}

pub fn matches(a: &str, b: &str) -> bool {
    match_type(a, b).is_some()
}

/// `1 - levenshtein / max_len` over already-normalized labels
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

fn substring_match(a: &str, b: &str) -> bool {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };

    if shorter.chars().count() < MIN_SUBSTRING_LEN {
        return false;
    }
    if DISTINCT_INDEX.contains(&(shorter.to_string(), longer.to_string())) {
        return false;
    }
    longer.contains(shorter)
}

/// Resume skill that satisfies `wanted`, if any.
pub fn find_match<'a>(wanted: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .find(|candidate| matches(wanted, candidate))
        .map(String::as_str)
}

/// Split `wanted` into (matched, missing), preserving its order.
pub fn partition_skills(wanted: &[String], candidates: &[String]) -> (Vec<String>, Vec<String>) {
    wanted
        .iter()
        .cloned()
        .partition(|skill| find_match(skill, candidates).is_some())
}

/// Well-known skills that appear as whole words anywhere in `text`.
///
/// Returned in display form, ordered by first occurrence, without
/// duplicates.
pub fn find_known_skills(text: &str) -> Vec<String> {
    // Overlapping scan: "SQL Servers" rejects "SQL Server" but must still yield "SQL"
    let mut bounded: Vec<(usize, usize, usize)> = KNOWN_SKILL_MATCHER
        .find_overlapping_iter(text)
        .filter(|mat| is_word_bounded(text, mat.start(), mat.end()))
        .map(|mat| (mat.start(), mat.end(), mat.pattern().as_usize()))
        .collect();
    bounded.sort_by_key(|&(start, end, _)| (start, Reverse(end)));

    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut covered_to = 0;

    // Longest whole-word match per start; spans inside an accepted one are skipped
    for (start, end, pattern) in bounded {
        if start < covered_to {
            continue;
        }
        covered_to = end;

        let skill = WELL_KNOWN_SKILLS[pattern];
        if seen.insert(skill.to_lowercase()) {
            found.push(skill.to_string());
        }
    }

    found
}

pub fn known_skill_count() -> usize {
    WELL_KNOWN_SKILLS.len()
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let matched = &text[start..end];
    let starts_alnum = matched.chars().next().is_some_and(char::is_alphanumeric);
    let ends_alnum = matched.chars().last().is_some_and(char::is_alphanumeric);

    let before_ok = !starts_alnum || text[..start].chars().next_back().map_or(true, |c| !c.is_alphanumeric());
    let after_ok = !ends_alnum || text[end..].chars().next().map_or(true, |c| !c.is_alphanumeric() && c != '+' && c != '#');

    before_ok && after_ok
}
