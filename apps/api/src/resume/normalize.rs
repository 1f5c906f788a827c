//! Normalizer: overlays an untrusted, partial or older-shaped document onto
//! the current default `Resume`, one field at a time.
//!
//! A field from the input wins only when it is present and of the right JSON
//! kind; anything else (absent, `null`, wrong kind, unknown enum literal) keeps
//! the default. The merge is total: there is no input for which it fails.

use serde_json::Value;
use tracing::debug;

use crate::resume::model::{
    create_empty_resume, AccomplishmentItem, ActivityItem, BulletStyle, CertificationItem,
    DateStyle, Density, DocumentOptions, EducationItem, ExperienceItem, FontFamily, FontSize,
    LineHeight, LinkDisplay, ProjectItem, PublicationItem, Resume, ResumeBasics, ResumeLink,
    ResumeMeta, SectionHeadingStyle, SectionKey, ShowSections, Skills, TemplateName,
    VolunteeringItem, DEFAULT_SECTION_ORDER,
};

/// Structural merge of an incoming JSON value onto a known-good value.
pub trait Overlay: Sized {
    fn overlay(self, incoming: &Value) -> Self;
}

/// Overlays `incoming[key]` onto `base` when the key is present.
fn field<T: Overlay>(base: T, incoming: &Value, key: &str) -> T {
    match incoming.get(key) {
        Some(value) => base.overlay(value),
        None => base,
    }
}

impl Overlay for String {
    fn overlay(self, incoming: &Value) -> Self {
        match incoming {
            Value::String(s) => s.clone(),
            _ => self,
        }
    }
}

impl Overlay for bool {
    fn overlay(self, incoming: &Value) -> Self {
        incoming.as_bool().unwrap_or(self)
    }
}

/// Sequences are taken from the input as a whole. Each element is laid over a
/// blank element, so an element of the wrong kind becomes a blank row and
/// positions are preserved.
impl<T: Overlay + Default> Overlay for Vec<T> {
    fn overlay(self, incoming: &Value) -> Self {
        match incoming {
            Value::Array(items) => items
                .iter()
                .map(|item| T::default().overlay(item))
                .collect(),
            _ => self,
        }
    }
}

macro_rules! overlay_literal {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Overlay for $ty {
                fn overlay(self, incoming: &Value) -> Self {
                    incoming.as_str().and_then(<$ty>::parse).unwrap_or(self)
                }
            }
        )+
    };
}

overlay_literal!(
    TemplateName,
    FontFamily,
    FontSize,
    LineHeight,
    SectionHeadingStyle,
    BulletStyle,
    DateStyle,
    Density,
    LinkDisplay,
);

impl Overlay for ShowSections {
    fn overlay(mut self, incoming: &Value) -> Self {
        for key in SectionKey::ALL {
            let current = self.is_visible(*key);
            self.set(*key, field(current, incoming, key.as_str()));
        }
        self
    }
}

impl Overlay for DocumentOptions {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            accent_color: field(self.accent_color, incoming, "accentColor"),
            font_family: field(self.font_family, incoming, "fontFamily"),
            font_size: field(self.font_size, incoming, "fontSize"),
            line_height: field(self.line_height, incoming, "lineHeight"),
            section_heading_style: field(
                self.section_heading_style,
                incoming,
                "sectionHeadingStyle",
            ),
            bullet_style: field(self.bullet_style, incoming, "bulletStyle"),
            date_style: field(self.date_style, incoming, "dateStyle"),
            density: field(self.density, incoming, "density"),
            link_display: field(self.link_display, incoming, "linkDisplay"),
            show_sections: field(self.show_sections, incoming, "showSections"),
            section_order: merge_section_order(incoming.get("sectionOrder")),
        }
    }
}

impl Overlay for ResumeMeta {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            version: field(self.version, incoming, "version"),
            template: field(self.template, incoming, "template"),
            created_at: field(self.created_at, incoming, "createdAt"),
            updated_at: field(self.updated_at, incoming, "updatedAt"),
            document_options: field(self.document_options, incoming, "documentOptions"),
        }
    }
}

impl Overlay for ResumeLink {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            label: field(self.label, incoming, "label"),
            url: field(self.url, incoming, "url"),
        }
    }
}

impl Overlay for ResumeBasics {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            name: field(self.name, incoming, "name"),
            headline: field(self.headline, incoming, "headline"),
            email: field(self.email, incoming, "email"),
            phone: field(self.phone, incoming, "phone"),
            location: field(self.location, incoming, "location"),
            summary: field(self.summary, incoming, "summary"),
            links: field(self.links, incoming, "links"),
        }
    }
}

impl Overlay for EducationItem {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            institution: field(self.institution, incoming, "institution"),
            degree: field(self.degree, incoming, "degree"),
            field: field(self.field, incoming, "field"),
            cgpa: field(self.cgpa, incoming, "cgpa"),
            start_date: field(self.start_date, incoming, "startDate"),
            end_date: field(self.end_date, incoming, "endDate"),
            location: field(self.location, incoming, "location"),
        }
    }
}

impl Overlay for ExperienceItem {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            company: field(self.company, incoming, "company"),
            role: field(self.role, incoming, "role"),
            location: field(self.location, incoming, "location"),
            start_date: field(self.start_date, incoming, "startDate"),
            end_date: field(self.end_date, incoming, "endDate"),
            bullets: field(self.bullets, incoming, "bullets"),
        }
    }
}

impl Overlay for ProjectItem {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            title: field(self.title, incoming, "title"),
            project_link: field(self.project_link, incoming, "projectLink"),
            repo_link: field(self.repo_link, incoming, "repoLink"),
            tech_stack: field(self.tech_stack, incoming, "techStack"),
            start_date: field(self.start_date, incoming, "startDate"),
            end_date: field(self.end_date, incoming, "endDate"),
            bullets: field(self.bullets, incoming, "bullets"),
        }
    }
}

impl Overlay for Skills {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            languages: field(self.languages, incoming, "languages"),
            frameworks: field(self.frameworks, incoming, "frameworks"),
            tools: field(self.tools, incoming, "tools"),
            other: field(self.other, incoming, "other"),
        }
    }
}

impl Overlay for CertificationItem {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            title: field(self.title, incoming, "title"),
            issuer: field(self.issuer, incoming, "issuer"),
            date: field(self.date, incoming, "date"),
            credential_id: field(self.credential_id, incoming, "credentialId"),
            credential_url: field(self.credential_url, incoming, "credentialUrl"),
        }
    }
}

impl Overlay for AccomplishmentItem {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            title: field(self.title, incoming, "title"),
            organization: field(self.organization, incoming, "organization"),
            location: field(self.location, incoming, "location"),
            start_date: field(self.start_date, incoming, "startDate"),
            end_date: field(self.end_date, incoming, "endDate"),
            bullets: field(self.bullets, incoming, "bullets"),
        }
    }
}

impl Overlay for ActivityItem {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            role: field(self.role, incoming, "role"),
            organization: field(self.organization, incoming, "organization"),
            location: field(self.location, incoming, "location"),
            start_date: field(self.start_date, incoming, "startDate"),
            end_date: field(self.end_date, incoming, "endDate"),
            reference_url: field(self.reference_url, incoming, "referenceUrl"),
        }
    }
}

impl Overlay for VolunteeringItem {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            role: field(self.role, incoming, "role"),
            organization: field(self.organization, incoming, "organization"),
            location: field(self.location, incoming, "location"),
            start_date: field(self.start_date, incoming, "startDate"),
            end_date: field(self.end_date, incoming, "endDate"),
            bullets: field(self.bullets, incoming, "bullets"),
        }
    }
}

impl Overlay for PublicationItem {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            title: field(self.title, incoming, "title"),
            venue: field(self.venue, incoming, "venue"),
            date: field(self.date, incoming, "date"),
            url: field(self.url, incoming, "url"),
        }
    }
}

impl Overlay for Resume {
    fn overlay(self, incoming: &Value) -> Self {
        Self {
            meta: field(self.meta, incoming, "meta"),
            basics: field(self.basics, incoming, "basics"),
            education: field(self.education, incoming, "education"),
            experience: field(self.experience, incoming, "experience"),
            projects: field(self.projects, incoming, "projects"),
            skills: field(self.skills, incoming, "skills"),
            certifications: field(self.certifications, incoming, "certifications"),
            accomplishments: field(self.accomplishments, incoming, "accomplishments"),
            activities: field(self.activities, incoming, "activities"),
            volunteering: field(self.volunteering, incoming, "volunteering"),
            publications: field(self.publications, incoming, "publications"),
        }
    }
}

/// Normalizes any JSON value into a complete `Resume`.
///
/// The base is a fresh `create_empty_resume()`, so a document without `meta`
/// receives the current timestamps.
pub fn normalize(input: &Value) -> Resume {
    if !input.is_object() {
        debug!("normalize: input is not an object, using defaults");
    }
    create_empty_resume().overlay(input)
}

/// Recognized keys in first-occurrence order, then every missing canonical key
/// in canonical order.
pub fn complete_section_order(requested: &[SectionKey]) -> Vec<SectionKey> {
    let mut order = Vec::with_capacity(DEFAULT_SECTION_ORDER.len());
    for key in requested.iter().copied().chain(DEFAULT_SECTION_ORDER) {
        if !order.contains(&key) {
            order.push(key);
        }
    }
    order
}

/// Section order from raw input: unknown and non-string entries are dropped
/// before completion.
fn merge_section_order(incoming: Option<&Value>) -> Vec<SectionKey> {
    let requested: Vec<SectionKey> = incoming
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .filter_map(SectionKey::parse)
        .collect();
    complete_section_order(&requested)
}
