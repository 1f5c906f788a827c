//! Résumé validator: a structural schema pass followed by independent
//! semantic rules. Every rule runs; findings accumulate in evaluation order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::resume::completeness::{
    count_meaningful, is_blank, skill_inventory, CompletenessSignals,
};
use crate::resume::model::Resume;
use crate::resume::normalize::normalize;
use crate::resume::schema::check_shape;
use crate::resume::scoring::compute_score;

pub const MAX_EXPERIENCE_BULLETS: usize = 4;
pub const MAX_PROJECT_BULLETS: usize = 3;
pub const MAX_ACCOMPLISHMENT_BULLETS: usize = 3;
pub const MAX_VOLUNTEERING_BULLETS: usize = 4;
pub const MAX_BULLET_CHARS: usize = 180;
/// Rough serialized length past which a single page is likely to overflow.
pub const ONE_PAGE_CHAR_BUDGET: usize = 6000;
pub const MIN_DISTINCT_SKILLS: usize = 3;
pub const DISCOVERABLE_SKILLS: usize = 6;

/// Errors and warnings in rule-evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Findings {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn require(&mut self, section: &str, field: &str, value: &str) {
        if is_blank(value) {
            self.error(format!("{section}.{field} is required"));
        }
    }

    fn check_bullets(&mut self, section: &str, index: usize, bullets: &[String], max: usize) {
        if bullets.len() > max {
            self.error(format!("{section}[{index}] has more than {max} bullets"));
        }
        for (bullet_index, bullet) in bullets.iter().enumerate() {
            if bullet.chars().count() > MAX_BULLET_CHARS {
                self.error(format!(
                    "{section}[{index}].bullets[{bullet_index}] exceeds {MAX_BULLET_CHARS} characters"
                ));
            }
        }
    }

    fn check_link(&mut self, section: &str, index: usize, field: &str, value: &str) {
        if !is_blank(value) && !value.starts_with("http") {
            self.warning(format!(
                "{section}[{index}].{field} should start with http or https"
            ));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub score: u32,
}

/// Validates a typed document. The structural pass runs over its JSON form,
/// which for a typed value can only flag an unsupported `meta.version`.
pub fn validate(resume: &Resume) -> ValidationResult {
    let shape_issues = serde_json::to_value(resume)
        .map(|value| check_shape(&value))
        .unwrap_or_default();
    evaluate(resume, shape_issues)
}

/// Validates an untrusted document: the structural pass sees the raw input,
/// the semantic rules see its normalization.
pub fn validate_document(input: &Value) -> ValidationResult {
    let shape_issues = check_shape(input);
    evaluate(&normalize(input), shape_issues)
}

fn evaluate(resume: &Resume, shape_issues: Vec<String>) -> ValidationResult {
    let mut findings = Findings {
        errors: shape_issues,
        warnings: Vec::new(),
    };

    apply_rules(resume, &mut findings);

    let signals = CompletenessSignals::from_resume(resume);
    let score = compute_score(&findings, &signals);

    debug!(
        errors = findings.errors.len(),
        warnings = findings.warnings.len(),
        score,
        "resume validated"
    );

    ValidationResult {
        valid: findings.errors.is_empty(),
        errors: findings.errors,
        warnings: findings.warnings,
        score,
    }
}

fn apply_rules(resume: &Resume, findings: &mut Findings) {
    let basics = &resume.basics;
    findings.require("basics", "name", &basics.name);
    findings.require("basics", "email", &basics.email);
    findings.require("basics", "phone", &basics.phone);

    if resume.education.is_empty() {
        findings.error("education must contain at least one entry");
    }
    for (index, item) in resume.education.iter().enumerate() {
        let section = format!("education[{index}]");
        findings.require(&section, "institution", &item.institution);
        findings.require(&section, "degree", &item.degree);
        findings.require(&section, "field", &item.field);
    }

    for (index, item) in resume.experience.iter().enumerate() {
        findings.check_bullets("experience", index, &item.bullets, MAX_EXPERIENCE_BULLETS);
    }

    for (index, item) in resume.projects.iter().enumerate() {
        findings.check_bullets("projects", index, &item.bullets, MAX_PROJECT_BULLETS);
        findings.check_link("projects", index, "projectLink", &item.project_link);
        findings.check_link("projects", index, "repoLink", &item.repo_link);
    }

    for (index, item) in resume.certifications.iter().enumerate() {
        findings.check_link("certifications", index, "credentialUrl", &item.credential_url);
    }

    for (index, item) in resume.accomplishments.iter().enumerate() {
        findings.check_bullets(
            "accomplishments",
            index,
            &item.bullets,
            MAX_ACCOMPLISHMENT_BULLETS,
        );
    }

    for (index, item) in resume.activities.iter().enumerate() {
        findings.check_link("activities", index, "referenceUrl", &item.reference_url);
    }

    for (index, item) in resume.volunteering.iter().enumerate() {
        findings.check_bullets("volunteering", index, &item.bullets, MAX_VOLUNTEERING_BULLETS);
    }

    for (index, item) in resume.publications.iter().enumerate() {
        findings.check_link("publications", index, "url", &item.url);
    }

    match count_meaningful(&resume.projects) {
        0 => findings.error("At least one project is required"),
        1 => findings.warning("Adding a second project improves profile depth"),
        _ => {}
    }

    if count_meaningful(&resume.experience) == 0 {
        findings.warning("Add at least one experience or internship entry");
    }

    let inventory = skill_inventory(&resume.skills);
    if !inventory.duplicates.is_empty() {
        findings.warning(format!(
            "Duplicate skills detected: {}",
            inventory.duplicates.join(", ")
        ));
    }

    let serialized_len = serde_json::to_string(resume)
        .map(|json| json.chars().count())
        .unwrap_or_default();
    if serialized_len > ONE_PAGE_CHAR_BUDGET {
        findings.warning("Resume may overflow one page. Reduce summary or bullet lengths.");
    }

    if is_blank(&basics.summary) {
        findings.warning("Adding a concise summary may improve profile strength.");
    }

    let unique_skills = inventory.unique.len();
    if unique_skills < MIN_DISTINCT_SKILLS {
        findings.error(format!("Add at least {MIN_DISTINCT_SKILLS} distinct skills"));
    } else if unique_skills < DISCOVERABLE_SKILLS {
        findings.warning("Add a few more skills to improve discoverability");
    }
}
