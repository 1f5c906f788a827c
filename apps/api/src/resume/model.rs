#![allow(dead_code)]
//! Canonical résumé document model and its defaults.
//!
//! Every string field defaults to `""` and every sequence to `[]`; the JSON
//! field names are camelCase so documents exchanged with the builder UI,
//! stored drafts and embed tokens all share one wire shape.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The only document schema version this service understands.
pub const SCHEMA_VERSION: &str = "1.0";

/// Declares a closed set of string literals as a unit enum, together with the
/// literal table used by the structural schema pass.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $lit:literal),+ $(,)? } default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $lit)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LITERALS: &'static [&'static str] = &[$($lit),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $lit),+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($lit => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
}

literal_enum! {
    /// Visual template used by the preview and export renderers.
    TemplateName { Minimal => "minimal", Compact => "compact" } default Minimal
}

literal_enum! {
    FontFamily {
        Satoshi => "satoshi",
        Clash => "clash",
        SpaceGrotesk => "spacegrotesk",
        InstrumentSerif => "instrumentserif",
        Inter => "inter",
        Helvetica => "helvetica",
        Times => "times",
    } default Satoshi
}

literal_enum! {
    FontSize { Small => "small", Normal => "normal", Large => "large" } default Normal
}

literal_enum! {
    LineHeight { Tight => "tight", Normal => "normal", Relaxed => "relaxed" } default Normal
}

literal_enum! {
    SectionHeadingStyle { Rule => "rule", Bold => "bold", Minimal => "minimal" } default Rule
}

literal_enum! {
    BulletStyle { Dot => "dot", Dash => "dash" } default Dot
}

literal_enum! {
    /// How start/end dates are joined; see `format::format_date_range_by_style`.
    DateStyle { Range => "range", Compact => "compact" } default Range
}

literal_enum! {
    Density { Comfortable => "comfortable", Compact => "compact", Relaxed => "relaxed" } default Comfortable
}

literal_enum! {
    LinkDisplay { Label => "label", Url => "url" } default Label
}

literal_enum! {
    /// Canonical document section identifiers.
    SectionKey {
        Summary => "summary",
        Education => "education",
        Experience => "experience",
        Projects => "projects",
        Skills => "skills",
        Certifications => "certifications",
        Accomplishments => "accomplishments",
        Activities => "activities",
        Volunteering => "volunteering",
        Publications => "publications",
    } default Summary
}

/// Canonical display order. `SectionKey::ALL` is declared in this order.
pub const DEFAULT_SECTION_ORDER: [SectionKey; 10] = [
    SectionKey::Summary,
    SectionKey::Education,
    SectionKey::Experience,
    SectionKey::Projects,
    SectionKey::Skills,
    SectionKey::Certifications,
    SectionKey::Accomplishments,
    SectionKey::Activities,
    SectionKey::Volunteering,
    SectionKey::Publications,
];

/// Per-section visibility. One flag per canonical section key, all on by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowSections {
    pub summary: bool,
    pub education: bool,
    pub experience: bool,
    pub projects: bool,
    pub skills: bool,
    pub certifications: bool,
    pub accomplishments: bool,
    pub activities: bool,
    pub volunteering: bool,
    pub publications: bool,
}

impl Default for ShowSections {
    fn default() -> Self {
        Self {
            summary: true,
            education: true,
            experience: true,
            projects: true,
            skills: true,
            certifications: true,
            accomplishments: true,
            activities: true,
            volunteering: true,
            publications: true,
        }
    }
}

impl ShowSections {
    pub fn is_visible(&self, key: SectionKey) -> bool {
        *self.flag(key)
    }

    pub fn set(&mut self, key: SectionKey, visible: bool) {
        *self.flag_mut(key) = visible;
    }

    fn flag(&self, key: SectionKey) -> &bool {
        match key {
            SectionKey::Summary => &self.summary,
            SectionKey::Education => &self.education,
            SectionKey::Experience => &self.experience,
            SectionKey::Projects => &self.projects,
            SectionKey::Skills => &self.skills,
            SectionKey::Certifications => &self.certifications,
            SectionKey::Accomplishments => &self.accomplishments,
            SectionKey::Activities => &self.activities,
            SectionKey::Volunteering => &self.volunteering,
            SectionKey::Publications => &self.publications,
        }
    }

    fn flag_mut(&mut self, key: SectionKey) -> &mut bool {
        match key {
            SectionKey::Summary => &mut self.summary,
            SectionKey::Education => &mut self.education,
            SectionKey::Experience => &mut self.experience,
            SectionKey::Projects => &mut self.projects,
            SectionKey::Skills => &mut self.skills,
            SectionKey::Certifications => &mut self.certifications,
            SectionKey::Accomplishments => &mut self.accomplishments,
            SectionKey::Activities => &mut self.activities,
            SectionKey::Volunteering => &mut self.volunteering,
            SectionKey::Publications => &mut self.publications,
        }
    }
}

/// Presentation and formatting configuration carried inside `meta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOptions {
    pub accent_color: String,
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub line_height: LineHeight,
    pub section_heading_style: SectionHeadingStyle,
    pub bullet_style: BulletStyle,
    pub date_style: DateStyle,
    pub density: Density,
    pub link_display: LinkDisplay,
    pub show_sections: ShowSections,
    pub section_order: Vec<SectionKey>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        create_default_document_options()
    }
}

/// The canonical option set handed to every new document.
pub fn create_default_document_options() -> DocumentOptions {
    DocumentOptions {
        accent_color: "#111111".to_string(),
        font_family: FontFamily::Satoshi,
        font_size: FontSize::Normal,
        line_height: LineHeight::Normal,
        section_heading_style: SectionHeadingStyle::Rule,
        bullet_style: BulletStyle::Dot,
        date_style: DateStyle::Range,
        density: Density::Comfortable,
        link_display: LinkDisplay::Label,
        show_sections: ShowSections::default(),
        section_order: DEFAULT_SECTION_ORDER.to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMeta {
    /// Kept as free text so an unknown version survives normalization and is
    /// reported by the schema pass instead of being silently rewritten.
    pub version: String,
    pub template: TemplateName,
    pub created_at: String,
    pub updated_at: String,
    pub document_options: DocumentOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeBasics {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub links: Vec<ResumeLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub cgpa: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub title: String,
    pub project_link: String,
    pub repo_link: String,
    pub tech_stack: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub other: Vec<String>,
}

impl Skills {
    /// All four categories flattened in declaration order.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.languages
            .iter()
            .chain(&self.frameworks)
            .chain(&self.tools)
            .chain(&self.other)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationItem {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: String,
    pub credential_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccomplishmentItem {
    pub title: String,
    pub organization: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub role: String,
    pub organization: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub reference_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteeringItem {
    pub role: String,
    pub organization: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationItem {
    pub title: String,
    pub venue: String,
    pub date: String,
    pub url: String,
}

/// Root aggregate. Sequence order is display order and is preserved by every
/// transform in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub meta: ResumeMeta,
    pub basics: ResumeBasics,
    pub education: Vec<EducationItem>,
    pub experience: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub skills: Skills,
    pub certifications: Vec<CertificationItem>,
    pub accomplishments: Vec<AccomplishmentItem>,
    pub activities: Vec<ActivityItem>,
    pub volunteering: Vec<VolunteeringItem>,
    pub publications: Vec<PublicationItem>,
}

/// A blank document stamped with the current UTC time.
///
/// Education and links start with one blank row each because the builder
/// always renders at least one editable row for them.
pub fn create_empty_resume() -> Resume {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    Resume {
        meta: ResumeMeta {
            version: SCHEMA_VERSION.to_string(),
            template: TemplateName::Minimal,
            created_at: now.clone(),
            updated_at: now,
            document_options: create_default_document_options(),
        },
        basics: ResumeBasics {
            links: vec![ResumeLink::default()],
            ..ResumeBasics::default()
        },
        education: vec![EducationItem::default()],
        experience: Vec::new(),
        projects: Vec::new(),
        skills: Skills::default(),
        certifications: Vec::new(),
        accomplishments: Vec::new(),
        activities: Vec::new(),
        volunteering: Vec::new(),
        publications: Vec::new(),
    }
}
