// Wire types and core domain enums

use serde::{Deserialize, Serialize};

/// Caption format requested by the client.
///
/// Anything other than the literal `"short"` (including a missing
/// field) is treated as the long format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdFormat {
    Short,
    #[default]
    Long,
}

impl AdFormat {
    pub fn from_param(value: Option<&str>) -> Self {
        if value == Some("short") {
            AdFormat::Short
        } else {
            AdFormat::Long
        }
    }

    pub fn is_short(self) -> bool {
        matches!(self, AdFormat::Short)
    }
}

/// Where a caption came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdSource {
    Remote,
    Template,
}

impl AdSource {
    pub fn as_str(self) -> &'static str {
        match self {
            AdSource::Remote => "pollinations-ai",
            AdSource::Template => "template",
        }
    }
}

/// A generated or templated ad caption
#[derive(Debug, Clone)]
pub struct AdText {
    pub body: String,
    pub source: AdSource,
}

/// Where a composed image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    RemoteComposited,
    FallbackGradient,
}

impl ImageSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSource::RemoteComposited => "pollinations-ai",
            ImageSource::FallbackGradient => "fallback-gradient",
        }
    }
}

/// Final composed creative, encoded inline. Never persisted.
#[derive(Debug, Clone)]
pub struct ComposedImage {
    pub data_uri: String,
    pub source: ImageSource,
}

/// `POST /generate-ad` request body
///
/// Required fields are optional here so that a missing field produces
/// the documented 400 body instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct AdRequestBody {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// `POST /generate-ad` response body
#[derive(Debug, Serialize)]
pub struct AdResponse {
    pub caption: String,
    pub model: &'static str,
}

/// `POST /generate-image` request body
#[derive(Debug, Deserialize)]
pub struct ImageRequestBody {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default, rename = "adText")]
    pub ad_text: Option<String>,
}

/// `POST /generate-image` response body
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub model: &'static str,
    #[serde(rename = "animalType")]
    pub animal_type: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_param_defaults_to_long() {
        assert_eq!(AdFormat::from_param(Some("short")), AdFormat::Short);
        assert_eq!(AdFormat::from_param(Some("long")), AdFormat::Long);
        assert_eq!(AdFormat::from_param(Some("banner")), AdFormat::Long);
        assert_eq!(AdFormat::from_param(None), AdFormat::Long);
    }

    #[test]
    fn model_labels_match_wire_contract() {
        assert_eq!(AdSource::Remote.as_str(), "pollinations-ai");
        assert_eq!(AdSource::Template.as_str(), "template");
        assert_eq!(ImageSource::RemoteComposited.as_str(), "pollinations-ai");
        assert_eq!(ImageSource::FallbackGradient.as_str(), "fallback-gradient");
    }
}
