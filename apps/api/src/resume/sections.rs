//! Renderer-facing view helpers. The HTML, PDF and DOCX renderers consume
//! these so every output agrees on which sections show and how links and
//! bullets read.

use crate::resume::completeness::{count_meaningful, has_any_skill, is_blank};
use crate::resume::model::{BulletStyle, LinkDisplay, Resume, SectionKey};
use crate::resume::normalize::complete_section_order;

/// Whether a section has anything worth rendering.
pub fn has_content(resume: &Resume, key: SectionKey) -> bool {
    match key {
        SectionKey::Summary => !is_blank(&resume.basics.summary),
        SectionKey::Education => count_meaningful(&resume.education) > 0,
        SectionKey::Experience => count_meaningful(&resume.experience) > 0,
        SectionKey::Projects => count_meaningful(&resume.projects) > 0,
        SectionKey::Skills => has_any_skill(&resume.skills),
        SectionKey::Certifications => count_meaningful(&resume.certifications) > 0,
        SectionKey::Accomplishments => count_meaningful(&resume.accomplishments) > 0,
        SectionKey::Activities => count_meaningful(&resume.activities) > 0,
        SectionKey::Volunteering => count_meaningful(&resume.volunteering) > 0,
        SectionKey::Publications => count_meaningful(&resume.publications) > 0,
    }
}

/// Sections to render, in display order: enabled and non-empty.
pub fn visible_sections(resume: &Resume) -> Vec<SectionKey> {
    let options = &resume.meta.document_options;
    complete_section_order(&options.section_order)
        .into_iter()
        .filter(|key| options.show_sections.is_visible(*key) && has_content(resume, *key))
        .collect()
}

pub fn link_text<'a>(label: &'a str, url: &'a str, display: LinkDisplay) -> &'a str {
    match display {
        LinkDisplay::Url => url,
        LinkDisplay::Label if is_blank(label) => url,
        LinkDisplay::Label => label,
    }
}

pub fn bullet_glyph(style: BulletStyle) -> &'static str {
    match style {
        BulletStyle::Dot => "\u{2022}",
        BulletStyle::Dash => "\u{2014}",
    }
}
