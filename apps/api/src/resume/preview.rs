//! Preview model: the renderer-neutral content of a résumé after empty-item
//! filtering, section ordering/visibility and date/link formatting.
//!
//! The HTML preview, PDF and DOCX renderers only lay this out. Building it in
//! one place keeps the three outputs (and the validator's counts) in step.

use serde::Serialize;

use crate::resume::completeness::{is_blank, meaningful_items};
use crate::resume::format::{format_date_range_by_style, format_single_date, to_comma_list};
use crate::resume::model::{DocumentOptions, Resume, SectionKey, TemplateName};
use crate::resume::sections::{bullet_glyph, link_text, visible_sections};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub title: String,
    pub subtitle: String,
    pub dates: String,
    pub details: Vec<String>,
    pub bullets: Vec<String>,
    pub links: Vec<PreviewLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSection {
    pub key: SectionKey,
    pub heading: &'static str,
    /// Free text, only for the summary section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub entries: Vec<PreviewEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewHeader {
    pub name: String,
    pub headline: String,
    pub contact: Vec<String>,
    pub links: Vec<PreviewLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub template: TemplateName,
    pub accent_color: String,
    pub bullet_glyph: &'static str,
    pub header: PreviewHeader,
    pub sections: Vec<PreviewSection>,
}

pub fn section_heading(key: SectionKey) -> &'static str {
    match key {
        SectionKey::Summary => "Summary",
        SectionKey::Education => "Education",
        SectionKey::Experience => "Experience",
        SectionKey::Projects => "Projects",
        SectionKey::Skills => "Skills",
        SectionKey::Certifications => "Certifications",
        SectionKey::Accomplishments => "Accomplishments",
        SectionKey::Activities => "Activities",
        SectionKey::Volunteering => "Volunteering",
        SectionKey::Publications => "Publications",
    }
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" \u{2022} ")
}

fn present(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|value| !is_blank(value))
        .cloned()
        .collect()
}

fn links(options: &DocumentOptions, candidates: &[(&str, &str)]) -> Vec<PreviewLink> {
    candidates
        .iter()
        .filter(|(_, url)| !is_blank(url))
        .map(|(label, url)| PreviewLink {
            text: link_text(label, url, options.link_display).to_string(),
            url: url.to_string(),
        })
        .collect()
}

fn section_entries(resume: &Resume, key: SectionKey) -> Vec<PreviewEntry> {
    let options = &resume.meta.document_options;
    let dates = |start: &str, end: &str| format_date_range_by_style(start, end, options.date_style);

    match key {
        SectionKey::Summary => Vec::new(),
        SectionKey::Education => meaningful_items(&resume.education)
            .map(|item| PreviewEntry {
                title: item.institution.clone(),
                subtitle: join_present(&[item.degree.as_str(), item.field.as_str()]),
                dates: dates(&item.start_date, &item.end_date),
                details: [
                    (!is_blank(&item.cgpa)).then(|| format!("CGPA: {}", item.cgpa.trim())),
                    (!is_blank(&item.location)).then(|| item.location.clone()),
                ]
                .into_iter()
                .flatten()
                .collect(),
                ..PreviewEntry::default()
            })
            .collect(),
        SectionKey::Experience => meaningful_items(&resume.experience)
            .map(|item| PreviewEntry {
                title: item.role.clone(),
                subtitle: join_present(&[item.company.as_str(), item.location.as_str()]),
                dates: dates(&item.start_date, &item.end_date),
                bullets: present(&item.bullets),
                ..PreviewEntry::default()
            })
            .collect(),
        SectionKey::Projects => meaningful_items(&resume.projects)
            .map(|item| PreviewEntry {
                title: item.title.clone(),
                subtitle: to_comma_list(&present(&item.tech_stack)),
                dates: dates(&item.start_date, &item.end_date),
                bullets: present(&item.bullets),
                links: links(
                    options,
                    &[("Live", item.project_link.as_str()), ("Source", item.repo_link.as_str())],
                ),
                ..PreviewEntry::default()
            })
            .collect(),
        SectionKey::Skills => {
            let skills = &resume.skills;
            [
                ("Languages", &skills.languages),
                ("Frameworks", &skills.frameworks),
                ("Tools", &skills.tools),
                ("Other", &skills.other),
            ]
            .into_iter()
            .map(|(title, items)| (title, present(items)))
            .filter(|(_, items)| !items.is_empty())
            .map(|(title, items)| PreviewEntry {
                title: title.to_string(),
                subtitle: to_comma_list(&items),
                ..PreviewEntry::default()
            })
            .collect()
        }
        SectionKey::Certifications => meaningful_items(&resume.certifications)
            .map(|item| PreviewEntry {
                title: item.title.clone(),
                subtitle: item.issuer.clone(),
                dates: format_single_date(&item.date),
                details: present(std::slice::from_ref(&item.credential_id)),
                links: links(options, &[("Credential", item.credential_url.as_str())]),
                ..PreviewEntry::default()
            })
            .collect(),
        SectionKey::Accomplishments => meaningful_items(&resume.accomplishments)
            .map(|item| PreviewEntry {
                title: item.title.clone(),
                subtitle: join_present(&[item.organization.as_str(), item.location.as_str()]),
                dates: dates(&item.start_date, &item.end_date),
                bullets: present(&item.bullets),
                ..PreviewEntry::default()
            })
            .collect(),
        SectionKey::Activities => meaningful_items(&resume.activities)
            .map(|item| PreviewEntry {
                title: item.role.clone(),
                subtitle: join_present(&[item.organization.as_str(), item.location.as_str()]),
                dates: dates(&item.start_date, &item.end_date),
                links: links(options, &[("Reference", item.reference_url.as_str())]),
                ..PreviewEntry::default()
            })
            .collect(),
        SectionKey::Volunteering => meaningful_items(&resume.volunteering)
            .map(|item| PreviewEntry {
                title: item.role.clone(),
                subtitle: join_present(&[item.organization.as_str(), item.location.as_str()]),
                dates: dates(&item.start_date, &item.end_date),
                bullets: present(&item.bullets),
                ..PreviewEntry::default()
            })
            .collect(),
        SectionKey::Publications => meaningful_items(&resume.publications)
            .map(|item| PreviewEntry {
                title: item.title.clone(),
                subtitle: item.venue.clone(),
                dates: format_single_date(&item.date),
                links: links(options, &[("Link", item.url.as_str())]),
                ..PreviewEntry::default()
            })
            .collect(),
    }
}

pub fn build_preview(resume: &Resume) -> Preview {
    let options = &resume.meta.document_options;
    let basics = &resume.basics;

    let header_links: Vec<(&str, &str)> = basics
        .links
        .iter()
        .map(|link| (link.label.as_str(), link.url.as_str()))
        .collect();

    let sections = visible_sections(resume)
        .into_iter()
        .map(|key| PreviewSection {
            key,
            heading: section_heading(key),
            text: (key == SectionKey::Summary).then(|| basics.summary.clone()),
            entries: section_entries(resume, key),
        })
        .collect();

    Preview {
        template: resume.meta.template,
        accent_color: options.accent_color.clone(),
        bullet_glyph: bullet_glyph(options.bullet_style),
        header: PreviewHeader {
            name: basics.name.clone(),
            headline: basics.headline.clone(),
            contact: [&basics.email, &basics.phone, &basics.location]
                .into_iter()
                .filter(|value| !is_blank(value))
                .cloned()
                .collect(),
            links: links(options, &header_links),
        },
        sections,
    }
}
