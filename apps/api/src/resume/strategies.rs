//! proptest strategies for résumé-shaped JSON.
//!
//! Keys are drawn mostly from the document's own field names so generated
//! values reach deep into the model instead of being ignored as unknown keys.

use proptest::prelude::*;
use serde_json::{Map, Value};

use crate::resume::model::SectionKey;

const DOCUMENT_KEYS: &[&str] = &[
    "meta",
    "version",
    "template",
    "createdAt",
    "updatedAt",
    "documentOptions",
    "accentColor",
    "fontFamily",
    "density",
    "dateStyle",
    "linkDisplay",
    "showSections",
    "sectionOrder",
    "basics",
    "name",
    "email",
    "phone",
    "summary",
    "links",
    "label",
    "url",
    "education",
    "institution",
    "degree",
    "experience",
    "company",
    "role",
    "startDate",
    "endDate",
    "bullets",
    "projects",
    "title",
    "techStack",
    "repoLink",
    "skills",
    "languages",
    "tools",
    "certifications",
    "credentialUrl",
    "accomplishments",
    "activities",
    "referenceUrl",
    "volunteering",
    "publications",
];

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 é_:/.#-]{0,24}".prop_map(Value::String),
        prop::sample::select(SectionKey::LITERALS).prop_map(Value::from),
        Just(Value::from("1.0")),
        Just(Value::from("2024-06")),
    ]
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::sample::select(DOCUMENT_KEYS).prop_map(str::to_string),
        1 => "[a-z]{1,8}",
    ]
}

/// Arbitrary JSON, biased toward résumé field names.
pub fn json_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(5, 128, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(key(), inner, 0..8)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

/// A `sectionOrder` value: usually an array mixing real keys, duplicates and
/// junk, sometimes not an array at all.
pub fn section_order() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => prop::collection::vec(
            prop_oneof![
                3 => prop::sample::select(SectionKey::LITERALS).prop_map(Value::from),
                1 => leaf(),
            ],
            0..16,
        )
        .prop_map(Value::Array),
        1 => leaf(),
    ]
}
