//! Basemap configuration.

use std::fmt;

use mapmark_core::Rgba;

/// Visual style of the basemap supplied by the external tile service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BasemapStyle {
    #[default]
    Topographic,
    Streets,
    Imagery,
}

impl BasemapStyle {
    /// Background tint drawn beneath the overlays; tile delivery itself is
    /// the service's concern.
    pub fn background(&self) -> Rgba {
        match self {
            BasemapStyle::Topographic => Rgba::opaque(242, 239, 233),
            BasemapStyle::Streets => Rgba::opaque(234, 236, 238),
            BasemapStyle::Imagery => Rgba::opaque(38, 44, 52),
        }
    }

    /// Attribution line shown over the map.
    pub fn attribution(&self) -> &'static str {
        match self {
            BasemapStyle::Topographic => "World Topographic Map © map service contributors",
            BasemapStyle::Streets => "World Streets Map © map service contributors",
            BasemapStyle::Imagery => "World Imagery © map service contributors",
        }
    }
}

/// Opaque credential for the external mapping service.
///
/// Configured once at process start and never validated locally.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Environment variable the key is read from.
    pub const ENV_VAR: &'static str = "MAPMARK_API_KEY";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from [`ApiKey::ENV_VAR`]; empty when unset.
    pub fn from_env() -> Self {
        Self(std::env::var(Self::ENV_VAR).unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep the credential out of logs.
        if self.0.is_empty() {
            f.write_str("ApiKey(unset)")
        } else {
            f.write_str("ApiKey(redacted)")
        }
    }
}

/// Basemap configuration handed to the map view.
#[derive(Debug, Clone, Default)]
pub struct Basemap {
    pub style: BasemapStyle,
    pub api_key: ApiKey,
}

impl Basemap {
    pub fn new(style: BasemapStyle, api_key: ApiKey) -> Self {
        Self { style, api_key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let key = ApiKey::new("very-secret-token");
        assert_eq!(format!("{:?}", key), "ApiKey(redacted)");
        assert_eq!(format!("{:?}", ApiKey::default()), "ApiKey(unset)");
    }

    #[test]
    fn test_key_is_opaque() {
        let key = ApiKey::new("  anything goes  ");
        assert_eq!(key.as_str(), "  anything goes  ");
        assert!(!key.is_empty());
    }

    #[test]
    fn test_default_style_is_topographic() {
        assert_eq!(Basemap::default().style, BasemapStyle::Topographic);
    }
}
