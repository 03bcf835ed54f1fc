//! .NET Core runtime versions and the base image table.
//!
//! The administrator supplies a version map of `VERSION=IMAGE` entries.
//! [`VersionTable::parse`] turns it into a table sorted newest first, and
//! [`VersionTable::get_base_image`] picks the first entry able to run the
//! version an app requests.
//!
//! # Compatibility rule
//!
//! An image supports a requested version when both share the same major
//! line (the first two dot-separated components, e.g. `2.1`) and the
//! image's version is numerically greater than or equal to the request.
//! Major lines never mix.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A dot-separated numeric version such as `2.1` or `2.1.5`.
///
/// Comparison is component-wise and numeric, with missing trailing
/// components treated as zero, so `2.1 == 2.1.0` and `2.10 > 2.9`.
///
/// # Examples
///
/// ```
/// use netdock_core::RuntimeVersion;
///
/// let a: RuntimeVersion = "2.1.10".parse().unwrap();
/// let b: RuntimeVersion = "2.1.9".parse().unwrap();
/// assert!(a > b);
/// assert_eq!(a.major_version(), "2.1");
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeVersion {
    raw: String,
    components: Vec<u64>,
}

impl RuntimeVersion {
    /// The version exactly as it was declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The major line: the first two dot-separated components of the
    /// declared string.
    pub fn major_version(&self) -> String {
        major_version(&self.raw)
    }
}

/// Returns the first two dot-separated components of `version`.
pub fn major_version(version: &str) -> String {
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}

impl FromStr for RuntimeVersion {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        if s.is_empty() {
            return Err(crate::Error::InvalidVersion {
                version: s.to_owned(),
                reason: "version is empty",
            });
        }

        let components = s
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| crate::Error::InvalidVersion {
                version: s.to_owned(),
                reason: "components must be non-negative integers",
            })?;

        Ok(Self {
            raw: s.to_owned(),
            components,
        })
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let a = self.components.get(i).copied().unwrap_or(0);
                let b = other.components.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RuntimeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for RuntimeVersion {}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A runtime base image for one .NET Core version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImage {
    version: RuntimeVersion,
    major_version: String,
    image: String,
}

impl BaseImage {
    pub fn new(version: RuntimeVersion, image: impl Into<String>) -> Self {
        let major_version = version.major_version();
        Self {
            version,
            major_version,
            image: image.into(),
        }
    }

    pub fn version(&self) -> &RuntimeVersion {
        &self.version
    }

    pub fn major_version(&self) -> &str {
        &self.major_version
    }

    /// Container image reference, e.g. `gcr.io/google-appengine/aspnetcore:2.1.5`.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Whether this image can run an app built against `requested`.
    pub fn supports(&self, requested: &RuntimeVersion) -> bool {
        self.major_version == requested.major_version() && self.version >= *requested
    }
}

/// Supported runtime versions and their base images, newest first.
#[derive(Debug, Clone)]
pub struct VersionTable {
    entries: Vec<BaseImage>,
}

impl VersionTable {
    /// Parse a version map of `VERSION=IMAGE` entries.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyVersionMap`](crate::Error::EmptyVersionMap) if no entries are given
    /// - [`Error::InvalidVersionMapEntry`](crate::Error::InvalidVersionMapEntry) if an
    ///   entry does not split into exactly two non-empty parts around `=`
    /// - [`Error::InvalidVersion`](crate::Error::InvalidVersion) if the version part is
    ///   not numeric
    pub fn parse<I, S>(entries: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = entries
            .into_iter()
            .map(|entry| parse_entry(entry.as_ref()))
            .collect::<crate::Result<Vec<_>>>()?;

        if parsed.is_empty() {
            return Err(crate::Error::EmptyVersionMap);
        }

        // Numeric ties (`2.1` vs `2.1.0`) go to the textually larger version.
        parsed.sort_by(|a, b| {
            b.version
                .cmp(&a.version)
                .then_with(|| b.version.as_str().cmp(a.version.as_str()))
        });

        tracing::debug!(entries = parsed.len(), "version table parsed");
        Ok(Self { entries: parsed })
    }

    pub fn entries(&self) -> &[BaseImage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry, in table order, that supports `requested`.
    ///
    /// Returns `None` when no entry matches; callers treat that as a hard
    /// failure rather than falling back to another major line.
    pub fn get_base_image(&self, requested: &RuntimeVersion) -> Option<&BaseImage> {
        let found = self.entries.iter().find(|entry| entry.supports(requested));
        match found {
            Some(entry) => tracing::debug!(
                requested = %requested,
                version = %entry.version,
                image = %entry.image,
                "base image resolved"
            ),
            None => tracing::debug!(requested = %requested, "no base image supports version"),
        }
        found
    }
}

fn parse_entry(entry: &str) -> crate::Result<BaseImage> {
    let parts: Vec<&str> = entry.split('=').collect();
    let [version, image] = parts.as_slice() else {
        return Err(crate::Error::InvalidVersionMapEntry {
            entry: entry.to_owned(),
        });
    };
    if version.is_empty() || image.is_empty() {
        return Err(crate::Error::InvalidVersionMapEntry {
            entry: entry.to_owned(),
        });
    }

    Ok(BaseImage::new(version.parse()?, *image))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> RuntimeVersion {
        s.parse().unwrap()
    }

    #[test]
    fn missing_components_compare_as_zero() {
        assert_eq!(v("2.1"), v("2.1.0"));
        assert!(v("2.1.1") > v("2.1"));
    }

    #[test]
    fn comparison_is_numeric_not_lexicographic() {
        assert!(v("1.0.10") > v("1.0.9"));
        assert!(v("2.10") > v("2.9"));
    }

    #[test]
    fn rejects_non_numeric_versions() {
        assert!("2.1-preview".parse::<RuntimeVersion>().is_err());
        assert!("".parse::<RuntimeVersion>().is_err());
        assert!("2..1".parse::<RuntimeVersion>().is_err());
    }

    #[test]
    fn major_version_takes_first_two_components() {
        assert_eq!(major_version("2.1.5"), "2.1");
        assert_eq!(major_version("2.1"), "2.1");
        assert_eq!(major_version("3"), "3");
    }

    #[test]
    fn entry_with_two_separators_is_rejected() {
        let err = parse_entry("1.0=img=x").unwrap_err();
        assert!(err.to_string().contains("1.0=img=x"));
    }

    #[test]
    fn entry_with_empty_side_is_rejected() {
        assert!(parse_entry("=img").is_err());
        assert!(parse_entry("1.0=").is_err());
        assert!(parse_entry("1.0").is_err());
    }

    #[test]
    fn numeric_tie_prefers_textually_larger_version() {
        let table = VersionTable::parse(["2.1=first", "2.1.0=second"]).unwrap();
        let images: Vec<_> = table.entries().iter().map(BaseImage::image).collect();
        assert_eq!(images, ["second", "first"]);

        let resolved = table.get_base_image(&"2.1".parse().unwrap()).unwrap();
        assert_eq!(resolved.image(), "second");
    }
}
