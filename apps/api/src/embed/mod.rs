//! Embed surface: the `/embed/<id>` URL contract shared with the `CVEmbed`
//! script on third-party pages, and resolution of an embed request back
//! into a résumé.

pub mod handlers;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::errors::AppError;
use crate::resume::codec::{decode, encode_value};
use crate::resume::model::Resume;
use crate::resume::preview::{build_preview, Preview};
use crate::resume::validation::{validate, ValidationResult};
use crate::storage::resumes::{check_resume_id, load_embed_resume};
use crate::storage::KeyValueStore;

/// Path segment used when the résumé travels inline in `data`.
pub const PORTABLE_ID: &str = "portable";
pub const DEFAULT_PRIMARY_COLOR: &str = "#111111";

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("resumeId or resumeData is required")]
    MissingSource,

    #[error("invalid resumeId: {0}")]
    InvalidResumeId(String),

    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl From<EmbedError> for AppError {
    fn from(e: EmbedError) -> Self {
        AppError::Validation(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedDensity {
    #[default]
    Normal,
    Compact,
}

impl EmbedDensity {
    /// `"compact"` selects compact; any other value is normal.
    pub fn from_param(value: &str) -> Self {
        match value {
            "compact" => EmbedDensity::Compact,
            _ => EmbedDensity::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmbedDensity::Normal => "normal",
            EmbedDensity::Compact => "compact",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedTheme {
    pub primary_color: Option<String>,
    /// Free text; unknown values fall back to normal.
    pub density: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedOptions {
    pub show_download: Option<bool>,
}

/// Same fields the `CVEmbed.render` script accepts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
    pub resume_id: Option<String>,
    pub resume_data: Option<Value>,
    pub base_url: Option<String>,
    #[serde(default)]
    pub theme: EmbedTheme,
    #[serde(default)]
    pub options: EmbedOptions,
}

/// Builds `/embed/<resumeId|portable>?data=…&primaryColor=…&density=…&showDownload=0`.
///
/// `config.base_url`, when set, overrides `default_base`.
pub fn build_embed_url(default_base: &Url, config: &EmbedConfig) -> Result<Url, EmbedError> {
    let inline_data = config.resume_data.as_ref().filter(|data| !data.is_null());
    if config.resume_id.is_none() && inline_data.is_none() {
        return Err(EmbedError::MissingSource);
    }

    let resume_path = match config.resume_id.as_deref() {
        Some(resume_id) if check_resume_id(resume_id).is_err() => {
            return Err(EmbedError::InvalidResumeId(resume_id.to_string()));
        }
        Some(resume_id) => resume_id,
        None => PORTABLE_ID,
    };

    let base = match &config.base_url {
        Some(base_url) => Url::parse(base_url)?,
        None => default_base.clone(),
    };
    let mut url = base.join(&format!("/embed/{resume_path}"))?;

    {
        let mut query = url.query_pairs_mut();
        if let Some(data) = inline_data {
            query.append_pair("data", &encode_value(data));
        }
        if let Some(color) = &config.theme.primary_color {
            query.append_pair("primaryColor", color);
        }
        if let Some(density) = &config.theme.density {
            query.append_pair("density", EmbedDensity::from_param(density).as_str());
        }
        if config.options.show_download == Some(false) {
            query.append_pair("showDownload", "0");
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Copy-paste HTML for host pages. Résumé text is embedded as a JS object
/// literal, with `</` escaped so it cannot close the script tag.
pub fn embed_snippet(base: &Url, resume: &Resume) -> String {
    let origin = base.origin().ascii_serialization();
    let data = serde_json::to_string_pretty(resume)
        .unwrap_or_default()
        .replace("</", "<\\/");

    format!(
        "<script src=\"{origin}/sdk.js\"></script>\n\
         <div id=\"resume-container\"></div>\n\
         <script>\n  CVEmbed.render({{\n    target: '#resume-container',\n    baseUrl: '{origin}',\n    resumeData: {data},\n    options: {{ showDownload: false }}\n  }});\n</script>"
    )
}

/// Fixed-size iframe for host pages that do not load the SDK.
pub fn iframe_snippet(embed_url: &Url) -> String {
    format!(
        "<iframe src=\"{}\" width=\"100%\" height=\"1100\" frameborder=\"0\"></iframe>",
        embed_url.as_str().replace('"', "&quot;")
    )
}

/// Query parameters of an `/embed/<id>` request, as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedQuery {
    pub data: Option<String>,
    pub primary_color: Option<String>,
    pub density: Option<String>,
    pub show_download: Option<String>,
}

impl EmbedQuery {
    pub fn show_download(&self) -> bool {
        self.show_download.as_deref() != Some("0")
    }

    pub fn primary_color(&self) -> String {
        self.primary_color
            .clone()
            .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string())
    }

    pub fn density(&self) -> EmbedDensity {
        self.density
            .as_deref()
            .map(EmbedDensity::from_param)
            .unwrap_or_default()
    }
}

/// Everything an embed page needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedView {
    pub resume: Resume,
    pub preview: Preview,
    pub validation: ValidationResult,
    pub primary_color: String,
    pub density: EmbedDensity,
    pub show_download: bool,
}

/// Inline `data` wins; an invalid token falls back to the stored résumé for
/// `resume_id`. `None` means the not-found presentation.
pub async fn resolve_embed(
    store: &dyn KeyValueStore,
    resume_id: &str,
    query: &EmbedQuery,
) -> Result<Option<EmbedView>, AppError> {
    let inline = query.data.as_deref().and_then(|token| {
        let decoded = decode(token);
        if decoded.is_none() {
            debug!("Embed data token for {resume_id} did not decode, falling back to store");
        }
        decoded
    });

    let resume = match inline {
        Some(resume) => Some(resume),
        None if check_resume_id(resume_id).is_ok() => {
            load_embed_resume(store, resume_id).await?
        }
        None => None,
    };

    Ok(resume.map(|resume| EmbedView {
        validation: validate(&resume),
        preview: build_preview(&resume),
        resume,
        primary_color: query.primary_color(),
        density: query.density(),
        show_download: query.show_download(),
    }))
}
