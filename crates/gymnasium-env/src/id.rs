//! Environment ids of the form `[namespace/]name[-vN]`.

use std::fmt;
use std::str::FromStr;

use gymnasium_core::RegistryError;

/// A parsed environment id.
///
/// ```
/// use gymnasium_env::EnvId;
///
/// let id: EnvId = "ALE/Breakout-v5".parse().unwrap();
/// assert_eq!(id.namespace(), Some("ALE"));
/// assert_eq!(id.name(), "Breakout");
/// assert_eq!(id.version(), Some(5));
/// assert_eq!(id.to_string(), "ALE/Breakout-v5");
///
/// let bare: EnvId = "MyEnv".parse().unwrap();
/// assert_eq!(bare.version(), None);
/// assert!("a/b/c".parse::<EnvId>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvId {
    namespace: Option<String>,
    name: String,
    version: Option<u32>,
}

impl EnvId {
    /// Build an id from parts.
    ///
    /// Returns `Err(RegistryError::MalformedId)` if a part contains
    /// characters outside `[A-Za-z0-9_:.-]` or the name is empty.
    pub fn new(
        namespace: Option<&str>,
        name: &str,
        version: Option<u32>,
    ) -> Result<Self, RegistryError> {
        let id = Self {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            version,
        };
        let valid = !name.is_empty()
            && is_valid_part(name)
            && namespace.is_none_or(|ns| !ns.is_empty() && is_valid_part(ns));
        if !valid {
            return Err(RegistryError::MalformedId { id: id.to_string() });
        }
        Ok(id)
    }

    /// The namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The environment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version, if any.
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// `true` if `other` has the same namespace and name.
    pub fn same_family(&self, other: &EnvId) -> bool {
        self.namespace == other.namespace && self.name == other.name
    }

    /// This id with a different version.
    pub fn with_version(&self, version: Option<u32>) -> EnvId {
        EnvId {
            version,
            ..self.clone()
        }
    }
}

fn is_valid_part(part: &str) -> bool {
    part.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
}

/// Split a trailing `-vN` off `rest`, if present.
fn split_version(rest: &str) -> (&str, Option<u32>) {
    if let Some(pos) = rest.rfind("-v") {
        let digits = &rest[pos + 2..];
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(v) = digits.parse() {
                return (&rest[..pos], Some(v));
            }
        }
    }
    (rest, None)
}

impl FromStr for EnvId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RegistryError::MalformedId { id: s.to_string() };
        let (namespace, rest) = match s.split_once('/') {
            Some((ns, rest)) => (Some(ns), rest),
            None => (None, s),
        };
        let (name, version) = split_version(rest);
        EnvId::new(namespace, name, version).map_err(|_| malformed())
    }
}

impl fmt::Display for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, "{ns}/")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(v) = self.version {
            write!(f, "-v{v}")?;
        }
        Ok(())
    }
}
