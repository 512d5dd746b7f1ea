//! Light/dark theme preference and its cookie encoding.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the cookie holding the preference.
pub const THEME_COOKIE: &str = "theme";
/// Lifetime of the cookie written on toggle.
pub const THEME_COOKIE_DAYS: i64 = 365;
/// Attribute on the root element that the page styles key off.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Theme stored in a `document.cookie` header, or the default when the
    /// cookie is absent or holds an unknown value.
    pub fn from_cookie_header(header: &str) -> Self {
        cookie_value(header, THEME_COOKIE)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Cookie assignment persisting this theme for [`THEME_COOKIE_DAYS`].
    pub fn set_cookie(self, now: DateTime<Utc>) -> String {
        let expires = now + Duration::days(THEME_COOKIE_DAYS);
        format!(
            "{}={};expires={};path=/",
            THEME_COOKIE,
            self.as_str(),
            expires.format("%a, %d %b %Y %H:%M:%S GMT")
        )
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Value of cookie `name` in a `a=1; b=2` style header. The value is
/// returned raw, without percent-decoding.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::from_cookie_header(""), Theme::Dark);
    }

    #[test]
    fn toggling_twice_is_identity() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_ne!(theme.toggled(), theme);
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn reads_theme_among_other_cookies() {
        let header = "session=abc; theme=light; lang=ja";
        assert_eq!(cookie_value(header, "theme"), Some("light"));
        assert_eq!(Theme::from_cookie_header(header), Theme::Light);
    }

    #[test]
    fn cookie_name_must_match_exactly() {
        let header = "mytheme=light;theme_old=light";
        assert_eq!(cookie_value(header, "theme"), None);
        assert_eq!(Theme::from_cookie_header(header), Theme::Dark);
    }

    #[test]
    fn unknown_or_empty_value_falls_back_to_dark() {
        assert_eq!(Theme::from_cookie_header("theme=blue"), Theme::Dark);
        assert_eq!(Theme::from_cookie_header("theme="), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn set_cookie_expires_a_year_out_on_root_path() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        let cookie = Theme::Light.set_cookie(now);
        assert_eq!(
            cookie,
            "theme=light;expires=Tue, 14 Jan 2025 08:30:00 GMT;path=/"
        );
    }

    #[test]
    fn written_cookie_reads_back_as_same_theme() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        for theme in [Theme::Dark, Theme::Light] {
            let cookie = theme.set_cookie(now);
            let (assignment, _) = cookie.split_once(';').unwrap();
            assert_eq!(Theme::from_cookie_header(assignment), theme);
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
