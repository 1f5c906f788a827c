//! JSON export: the exact `Resume` serialization, pretty-printed, plus the
//! download file name shared with the PDF and DOCX exports.

use crate::resume::completeness::is_blank;
use crate::resume::model::Resume;

pub fn to_pretty_json(resume: &Resume) -> String {
    serde_json::to_string_pretty(resume).unwrap_or_default()
}

/// `"Jane  Q Doe"` + `"pdf"` → `"Jane_Q_Doe.pdf"`; a blank name falls back to
/// `resume`.
pub fn export_file_name(resume: &Resume, extension: &str) -> String {
    let name = resume.basics.name.as_str();
    let stem = if is_blank(name) {
        "resume".to_string()
    } else {
        name.split_whitespace().collect::<Vec<_>>().join("_")
    };
    format!("{stem}.{extension}")
}
