//! Completeness predicates shared by the validator and the renderers.
//!
//! An item is "meaningful" when any of its own text fields is non-blank or any
//! of its list fields holds a non-blank entry. Renderers filter with the same
//! predicate so a preview never shows a card the validator did not count.

use serde::{Deserialize, Serialize};

use crate::resume::model::{
    AccomplishmentItem, ActivityItem, CertificationItem, EducationItem, ExperienceItem,
    ProjectItem, PublicationItem, Resume, ResumeLink, Skills, VolunteeringItem,
};

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn has_any_text(values: &[&str]) -> bool {
    values.iter().any(|value| !is_blank(value))
}

fn has_any_entry(values: &[String]) -> bool {
    values.iter().any(|value| !is_blank(value))
}

pub trait Meaningful {
    fn is_meaningful(&self) -> bool;
}

impl Meaningful for ResumeLink {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[&self.label, &self.url])
    }
}

impl Meaningful for EducationItem {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[
            &self.institution,
            &self.degree,
            &self.field,
            &self.cgpa,
            &self.start_date,
            &self.end_date,
            &self.location,
        ])
    }
}

impl Meaningful for ExperienceItem {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[
            &self.company,
            &self.role,
            &self.location,
            &self.start_date,
            &self.end_date,
        ]) || has_any_entry(&self.bullets)
    }
}

impl Meaningful for ProjectItem {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[
            &self.title,
            &self.project_link,
            &self.repo_link,
            &self.start_date,
            &self.end_date,
        ]) || has_any_entry(&self.tech_stack)
            || has_any_entry(&self.bullets)
    }
}

impl Meaningful for CertificationItem {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[
            &self.title,
            &self.issuer,
            &self.date,
            &self.credential_id,
            &self.credential_url,
        ])
    }
}

impl Meaningful for AccomplishmentItem {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[
            &self.title,
            &self.organization,
            &self.location,
            &self.start_date,
            &self.end_date,
        ]) || has_any_entry(&self.bullets)
    }
}

impl Meaningful for ActivityItem {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[
            &self.role,
            &self.organization,
            &self.location,
            &self.start_date,
            &self.end_date,
            &self.reference_url,
        ])
    }
}

impl Meaningful for VolunteeringItem {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[
            &self.role,
            &self.organization,
            &self.location,
            &self.start_date,
            &self.end_date,
        ]) || has_any_entry(&self.bullets)
    }
}

impl Meaningful for PublicationItem {
    fn is_meaningful(&self) -> bool {
        has_any_text(&[&self.title, &self.venue, &self.date, &self.url])
    }
}

/// Iterates the items worth rendering, in display order.
pub fn meaningful_items<T: Meaningful>(items: &[T]) -> impl Iterator<Item = &T> {
    items.iter().filter(|item| item.is_meaningful())
}

pub fn count_meaningful<T: Meaningful>(items: &[T]) -> usize {
    meaningful_items(items).count()
}

pub fn has_any_skill(skills: &Skills) -> bool {
    skills.all().any(|skill| !is_blank(skill))
}

/// Unique skills under trim + lowercase folding, and the surface forms of the
/// repeats (each reported once, in first-repeat order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillInventory {
    pub unique: Vec<String>,
    pub duplicates: Vec<String>,
}

pub fn skill_inventory(skills: &Skills) -> SkillInventory {
    let mut inventory = SkillInventory::default();

    for skill in skills.all() {
        let surface = skill.trim();
        let folded = surface.to_lowercase();
        if folded.is_empty() {
            continue;
        }
        if !inventory.unique.contains(&folded) {
            inventory.unique.push(folded);
        } else if !inventory.duplicates.iter().any(|d| d == surface) {
            inventory.duplicates.push(surface.to_string());
        }
    }

    inventory
}

/// Document-level signals feeding the score bonus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessSignals {
    pub meaningful_projects: usize,
    pub meaningful_experience: usize,
    pub has_summary: bool,
    pub unique_skills: usize,
    pub has_link_url: bool,
}

impl CompletenessSignals {
    pub fn from_resume(resume: &Resume) -> Self {
        Self {
            meaningful_projects: count_meaningful(&resume.projects),
            meaningful_experience: count_meaningful(&resume.experience),
            has_summary: !is_blank(&resume.basics.summary),
            unique_skills: skill_inventory(&resume.skills).unique.len(),
            has_link_url: resume.basics.links.iter().any(|link| !is_blank(&link.url)),
        }
    }
}
