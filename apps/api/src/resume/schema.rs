//! Declarative shape schema for a serialized `Resume`.
//!
//! Each issue is reported as `"<dotted.path>: <message>"`, with array indices
//! as path segments (`education.0.institution`). Unknown keys are ignored.

use serde_json::Value;

use crate::resume::model::{
    BulletStyle, DateStyle, Density, FontFamily, FontSize, LineHeight, LinkDisplay,
    SectionHeadingStyle, SectionKey, TemplateName, SCHEMA_VERSION,
};

/// Expected JSON kind of a field.
#[derive(Debug)]
pub enum Kind {
    Str,
    Bool,
    Literal(&'static str),
    OneOf(&'static [&'static str]),
    List(&'static Kind),
    Object(&'static [(&'static str, Kind)]),
}

const LINK: &[(&str, Kind)] = &[("label", Kind::Str), ("url", Kind::Str)];

const EDUCATION: &[(&str, Kind)] = &[
    ("institution", Kind::Str),
    ("degree", Kind::Str),
    ("field", Kind::Str),
    ("cgpa", Kind::Str),
    ("startDate", Kind::Str),
    ("endDate", Kind::Str),
    ("location", Kind::Str),
];

const EXPERIENCE: &[(&str, Kind)] = &[
    ("company", Kind::Str),
    ("role", Kind::Str),
    ("location", Kind::Str),
    ("startDate", Kind::Str),
    ("endDate", Kind::Str),
    ("bullets", Kind::List(&Kind::Str)),
];

const PROJECT: &[(&str, Kind)] = &[
    ("title", Kind::Str),
    ("projectLink", Kind::Str),
    ("repoLink", Kind::Str),
    ("techStack", Kind::List(&Kind::Str)),
    ("startDate", Kind::Str),
    ("endDate", Kind::Str),
    ("bullets", Kind::List(&Kind::Str)),
];

const CERTIFICATION: &[(&str, Kind)] = &[
    ("title", Kind::Str),
    ("issuer", Kind::Str),
    ("date", Kind::Str),
    ("credentialId", Kind::Str),
    ("credentialUrl", Kind::Str),
];

const ACCOMPLISHMENT: &[(&str, Kind)] = &[
    ("title", Kind::Str),
    ("organization", Kind::Str),
    ("location", Kind::Str),
    ("startDate", Kind::Str),
    ("endDate", Kind::Str),
    ("bullets", Kind::List(&Kind::Str)),
];

const ACTIVITY: &[(&str, Kind)] = &[
    ("role", Kind::Str),
    ("organization", Kind::Str),
    ("location", Kind::Str),
    ("startDate", Kind::Str),
    ("endDate", Kind::Str),
    ("referenceUrl", Kind::Str),
];

const VOLUNTEERING: &[(&str, Kind)] = &[
    ("role", Kind::Str),
    ("organization", Kind::Str),
    ("location", Kind::Str),
    ("startDate", Kind::Str),
    ("endDate", Kind::Str),
    ("bullets", Kind::List(&Kind::Str)),
];

const PUBLICATION: &[(&str, Kind)] = &[
    ("title", Kind::Str),
    ("venue", Kind::Str),
    ("date", Kind::Str),
    ("url", Kind::Str),
];

const SHOW_SECTIONS: &[(&str, Kind)] = &[
    ("summary", Kind::Bool),
    ("education", Kind::Bool),
    ("experience", Kind::Bool),
    ("projects", Kind::Bool),
    ("skills", Kind::Bool),
    ("certifications", Kind::Bool),
    ("accomplishments", Kind::Bool),
    ("activities", Kind::Bool),
    ("volunteering", Kind::Bool),
    ("publications", Kind::Bool),
];

const DOCUMENT_OPTIONS: &[(&str, Kind)] = &[
    ("accentColor", Kind::Str),
    ("fontFamily", Kind::OneOf(FontFamily::LITERALS)),
    ("fontSize", Kind::OneOf(FontSize::LITERALS)),
    ("lineHeight", Kind::OneOf(LineHeight::LITERALS)),
    ("sectionHeadingStyle", Kind::OneOf(SectionHeadingStyle::LITERALS)),
    ("bulletStyle", Kind::OneOf(BulletStyle::LITERALS)),
    ("dateStyle", Kind::OneOf(DateStyle::LITERALS)),
    ("density", Kind::OneOf(Density::LITERALS)),
    ("linkDisplay", Kind::OneOf(LinkDisplay::LITERALS)),
    ("showSections", Kind::Object(SHOW_SECTIONS)),
    ("sectionOrder", Kind::List(&Kind::OneOf(SectionKey::LITERALS))),
];

const META: &[(&str, Kind)] = &[
    ("version", Kind::Literal(SCHEMA_VERSION)),
    ("template", Kind::OneOf(TemplateName::LITERALS)),
    ("createdAt", Kind::Str),
    ("updatedAt", Kind::Str),
    ("documentOptions", Kind::Object(DOCUMENT_OPTIONS)),
];

const BASICS: &[(&str, Kind)] = &[
    ("name", Kind::Str),
    ("headline", Kind::Str),
    ("email", Kind::Str),
    ("phone", Kind::Str),
    ("location", Kind::Str),
    ("summary", Kind::Str),
    ("links", Kind::List(&Kind::Object(LINK))),
];

const SKILLS: &[(&str, Kind)] = &[
    ("languages", Kind::List(&Kind::Str)),
    ("frameworks", Kind::List(&Kind::Str)),
    ("tools", Kind::List(&Kind::Str)),
    ("other", Kind::List(&Kind::Str)),
];

pub const RESUME_SCHEMA: Kind = Kind::Object(&[
    ("meta", Kind::Object(META)),
    ("basics", Kind::Object(BASICS)),
    ("education", Kind::List(&Kind::Object(EDUCATION))),
    ("experience", Kind::List(&Kind::Object(EXPERIENCE))),
    ("projects", Kind::List(&Kind::Object(PROJECT))),
    ("skills", Kind::Object(SKILLS)),
    ("certifications", Kind::List(&Kind::Object(CERTIFICATION))),
    ("accomplishments", Kind::List(&Kind::Object(ACCOMPLISHMENT))),
    ("activities", Kind::List(&Kind::Object(ACTIVITY))),
    ("volunteering", Kind::List(&Kind::Object(VOLUNTEERING))),
    ("publications", Kind::List(&Kind::Object(PUBLICATION))),
]);

fn received(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected_literals(options: &[&str]) -> String {
    options
        .iter()
        .map(|option| format!("'{option}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Checks `value` against the résumé schema, returning every issue found.
pub fn check_shape(value: &Value) -> Vec<String> {
    let mut issues = Vec::new();
    let mut path = Vec::new();
    check(&RESUME_SCHEMA, value, &mut path, &mut issues);
    issues
}

fn issue(path: &[String], message: impl std::fmt::Display) -> String {
    format!("{}: {}", path.join("."), message)
}

fn check(kind: &Kind, value: &Value, path: &mut Vec<String>, issues: &mut Vec<String>) {
    match (kind, value) {
        (Kind::Str, Value::String(_)) | (Kind::Bool, Value::Bool(_)) => {}
        (Kind::Str, other) => issues.push(issue(
            path,
            format_args!("Expected string, received {}", received(other)),
        )),
        (Kind::Bool, other) => issues.push(issue(
            path,
            format_args!("Expected boolean, received {}", received(other)),
        )),
        (Kind::Literal(expected), other) => {
            if other.as_str() != Some(*expected) {
                issues.push(issue(
                    path,
                    format_args!("Invalid literal value, expected \"{expected}\""),
                ));
            }
        }
        (Kind::OneOf(options), Value::String(s)) => {
            if !options.contains(&s.as_str()) {
                issues.push(issue(
                    path,
                    format_args!(
                        "Invalid enum value. Expected {}, received '{s}'",
                        expected_literals(options)
                    ),
                ));
            }
        }
        (Kind::OneOf(options), other) => issues.push(issue(
            path,
            format_args!(
                "Expected {}, received {}",
                expected_literals(options),
                received(other)
            ),
        )),
        (Kind::List(element), Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                check(element, item, path, issues);
                path.pop();
            }
        }
        (Kind::List(_), other) => issues.push(issue(
            path,
            format_args!("Expected array, received {}", received(other)),
        )),
        (Kind::Object(fields), Value::Object(map)) => {
            for (key, field_kind) in fields.iter() {
                path.push((*key).to_string());
                match map.get(*key) {
                    Some(field_value) => check(field_kind, field_value, path, issues),
                    None => issues.push(issue(path, "Required")),
                }
                path.pop();
            }
        }
        (Kind::Object(_), other) => issues.push(issue(
            path,
            format_args!("Expected object, received {}", received(other)),
        )),
    }
}
