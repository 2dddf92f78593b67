//! Metadata key parsing
//!
//! Records are stored under `<base>` or `<base>/<platform>`. The platform,
//! when present, scopes attribute filtering and dependency decoding to one
//! variant of a multi-platform build.

/// Separator between a scoped attribute key and its platform
const PLATFORM_SUFFIX_SEP: &str = "::";

/// A metadata key split into base and optional platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataKey<'a> {
    pub base: &'a str,
    pub platform: Option<&'a str>,
}

impl<'a> MetadataKey<'a> {
    /// Split once on the first `/`; everything after it is the platform
    pub fn parse(key: &'a str) -> Self {
        match key.split_once('/') {
            Some((base, platform)) if !platform.is_empty() => Self {
                base,
                platform: Some(platform),
            },
            Some((base, _)) => Self {
                base,
                platform: None,
            },
            None => Self {
                base: key,
                platform: None,
            },
        }
    }

    /// `::<platform>` suffix used by platform scoped attribute keys
    pub fn platform_suffix(&self) -> Option<String> {
        self.platform
            .map(|p| format!("{}{}", PLATFORM_SUFFIX_SEP, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_without_platform() {
        let key = MetadataKey::parse("containerimage.buildinfo");
        assert_eq!(key.base, "containerimage.buildinfo");
        assert_eq!(key.platform, None);
        assert_eq!(key.platform_suffix(), None);
    }

    #[test]
    fn key_with_platform() {
        let key = MetadataKey::parse("meta/linux/arm64/v8");
        assert_eq!(key.base, "meta");
        assert_eq!(key.platform, Some("linux/arm64/v8"));
        assert_eq!(key.platform_suffix().as_deref(), Some("::linux/arm64/v8"));
    }

    #[test]
    fn trailing_slash_has_no_platform() {
        let key = MetadataKey::parse("meta/");
        assert_eq!(key.base, "meta");
        assert_eq!(key.platform, None);
    }
}
