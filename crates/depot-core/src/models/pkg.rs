use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MEDIA_TYPE_PNG: &str = "image/png";
pub const MEDIA_TYPE_HVIF: &str = "application/x-vnd.haiku-icon";

/// `urlTypeCode` of a package's project home page.
pub const URL_TYPE_HOMEPAGE: &str = "homepage";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PkgVersionType {
    #[default]
    Latest,
    None,
    Specific,
}

impl PkgVersionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "LATEST",
            Self::None => "NONE",
            Self::Specific => "SPECIFIC",
        }
    }
}

impl std::str::FromStr for PkgVersionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LATEST" => Ok(Self::Latest),
            "NONE" => Ok(Self::None),
            "SPECIFIC" => Ok(Self::Specific),
            other => Err(format!("Unknown version type '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// getPkg
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetPkgRequest {
    pub name: String,
    pub version_type: PkgVersionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub micro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,
}

impl GetPkgRequest {
    /// The latest version of `name` for an architecture.
    pub fn latest(name: impl Into<String>, architecture_code: Option<String>) -> Self {
        Self {
            name: name.into(),
            version_type: PkgVersionType::Latest,
            architecture_code,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PkgVersion {
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub minor: Option<String>,
    #[serde(default)]
    pub micro: Option<String>,
    #[serde(default)]
    pub pre_release: Option<String>,
    #[serde(default)]
    pub revision: Option<u32>,
    #[serde(default)]
    pub architecture_code: Option<String>,
    #[serde(default)]
    pub repository_code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_latest: Option<bool>,
    #[serde(default)]
    pub urls: Vec<PkgUrl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PkgUrl {
    pub url: String,
    pub url_type_code: String,
}

impl PkgVersion {
    /// `major.minor.micro~preRelease-revision`, omitting missing parts.
    pub fn version_string(&self) -> String {
        let mut s = String::new();
        for part in [&self.major, &self.minor, &self.micro].into_iter().flatten() {
            if !s.is_empty() {
                s.push('.');
            }
            s.push_str(part);
        }
        if let Some(pre) = &self.pre_release {
            s.push('~');
            s.push_str(pre);
        }
        if let Some(revision) = self.revision {
            s.push('-');
            s.push_str(&revision.to_string());
        }
        s
    }

    /// The first URL tagged as the project home page.
    pub fn homepage_url(&self) -> Option<&str> {
        self.urls
            .iter()
            .find(|u| u.url_type_code == URL_TYPE_HOMEPAGE)
            .map(|u| u.url.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetPkgResult {
    pub name: String,
    #[serde(default)]
    pub has_icon: bool,
    /// Whether the authenticated user may change this package, icons
    /// included. Absent for anonymous lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub modify_timestamp: Option<i64>,
    #[serde(default)]
    pub vanity_url: Option<String>,
    #[serde(default)]
    pub derived_rating: Option<f32>,
    #[serde(default)]
    pub pkg_category_codes: Vec<String>,
    #[serde(default)]
    pub versions: Vec<PkgVersion>,
}

impl GetPkgResult {
    pub fn modify_time(&self) -> Option<DateTime<Utc>> {
        self.modify_timestamp.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit.unwrap_or(false)
    }

    /// Home page of the first returned version, which for a `LATEST` lookup
    /// is the latest one.
    pub fn homepage_url(&self) -> Option<&str> {
        self.versions.first().and_then(PkgVersion::homepage_url)
    }
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetPkgIconsRequest {
    pub pkg_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PkgIcon {
    pub media_type_code: String,
    /// Pixel size for bitmaps; absent for vector icons.
    #[serde(default)]
    pub size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetPkgIconsResult {
    #[serde(default)]
    pub pkg_icons: Vec<PkgIcon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurePkgIcon {
    pub media_type_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub data_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurePkgIconRequest {
    pub pkg_name: String,
    pub pkg_icons: Vec<ConfigurePkgIcon>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigurePkgIconResult {}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RemovePkgIconRequest {
    pub pkg_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemovePkgIconResult {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_pkg_request_wire_shape() {
        let req = GetPkgRequest::latest("vim", Some("x86_64".to_string()));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"name": "vim", "versionType": "LATEST", "architectureCode": "x86_64"})
        );
    }

    #[test]
    fn test_get_pkg_result_decodes_partial_payload() {
        let result: GetPkgResult = serde_json::from_value(json!({
            "name": "pkg1",
            "hasIcon": true,
            "modifyTimestamp": 1400000000000i64,
            "versions": [{
                "major": "1", "micro": "2", "revision": 4,
                "architectureCode": "x86_64",
                "summary": "pkg1Version2SummaryEnglish_persimon",
                "unknownField": 17
            }]
        }))
        .unwrap();

        assert!(result.has_icon);
        assert_eq!(result.versions.len(), 1);
        assert_eq!(result.versions[0].version_string(), "1.2-4");
        assert_eq!(
            result.modify_time().map(|t| t.timestamp()),
            Some(1_400_000_000)
        );
        assert!(result.pkg_category_codes.is_empty());
    }

    #[test]
    fn test_edit_flag_and_homepage() {
        let result: GetPkgResult = serde_json::from_value(json!({
            "name": "pkg1",
            "canEdit": true,
            "versions": [{
                "major": "1",
                "urls": [
                    {"url": "https://example.com/src", "urlTypeCode": "source"},
                    {"url": "https://example.com", "urlTypeCode": "homepage"}
                ]
            }]
        }))
        .unwrap();

        assert!(result.can_edit());
        assert_eq!(result.homepage_url(), Some("https://example.com"));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["canEdit"], true);
        assert_eq!(value["versions"][0]["urls"][1]["urlTypeCode"], "homepage");
    }

    #[test]
    fn test_anonymous_pkg_is_not_editable() {
        let result: GetPkgResult = serde_json::from_value(json!({
            "name": "pkg1",
            "versions": [{"major": "1"}]
        }))
        .unwrap();

        assert!(!result.can_edit());
        assert_eq!(result.homepage_url(), None);
        assert_eq!(GetPkgResult::default().homepage_url(), None);
        assert!(serde_json::to_value(&result).unwrap().get("canEdit").is_none());
    }

    #[test]
    fn test_version_string_with_pre_release() {
        let v = PkgVersion {
            major: Some("0".into()),
            minor: Some("9".into()),
            pre_release: Some("beta1".into()),
            ..PkgVersion::default()
        };
        assert_eq!(v.version_string(), "0.9~beta1");
    }

    #[test]
    fn test_configure_icon_omits_vector_size() {
        let req = ConfigurePkgIconRequest {
            pkg_name: "pkg1".into(),
            pkg_icons: vec![ConfigurePkgIcon {
                media_type_code: MEDIA_TYPE_HVIF.into(),
                size: None,
                data_base64: "bmNpZg==".into(),
            }],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["pkgIcons"][0].get("size"), None);
        assert_eq!(value["pkgIcons"][0]["mediaTypeCode"], MEDIA_TYPE_HVIF);
    }

    #[test]
    fn test_version_type_parse() {
        assert_eq!("latest".parse::<PkgVersionType>(), Ok(PkgVersionType::Latest));
        assert_eq!(PkgVersionType::Specific.as_str(), "SPECIFIC");
        assert!("newest".parse::<PkgVersionType>().is_err());
    }
}
