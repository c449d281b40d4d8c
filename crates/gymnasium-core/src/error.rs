//! Error types for gymnasium-rs.
//!
//! Organized by subsystem: spaces, environments, the environment
//! registry, and native module loading. [`GymnasiumError`] wraps all of
//! them for callers that cross subsystem boundaries.

use std::error::Error;
use std::fmt;

/// Result alias defaulting to [`GymnasiumError`].
pub type Result<T, E = GymnasiumError> = std::result::Result<T, E>;

/// Errors from space construction, validation, and flattening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// Bounds are inconsistent (e.g. `low > high`, or NaN).
    InvalidBounds {
        /// Description of the offending bound.
        reason: String,
    },
    /// The space would contain no elements.
    Empty {
        /// Which parameter made the space empty.
        what: String,
    },
    /// `start + n` does not fit the element type.
    Overflow {
        /// Description of the overflowing parameters.
        reason: String,
    },
    /// Two arrays that must share a shape do not.
    ShapeMismatch {
        /// The required shape.
        expected: Vec<usize>,
        /// The shape that was supplied.
        actual: Vec<usize>,
    },
    /// A sampling mask does not fit the space.
    InvalidMask {
        /// What is wrong with the mask.
        reason: String,
    },
    /// A value does not have the kind or layout the space expects.
    ValueMismatch {
        /// The kind the space expected.
        expected: &'static str,
        /// What was wrong with the value.
        reason: String,
    },
    /// Constructor parameters could not be interpreted.
    InvalidParameters {
        /// Which space was being built.
        space: &'static str,
        /// What was wrong with the parameters.
        reason: String,
    },
    /// The space has no flat vector representation.
    NotFlattenable {
        /// Name of the space type.
        space: &'static str,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { reason } => write!(f, "invalid bounds: {reason}"),
            Self::Empty { what } => write!(f, "space is empty: {what}"),
            Self::Overflow { reason } => write!(f, "space overflows its element type: {reason}"),
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected:?}, got {actual:?}")
            }
            Self::InvalidMask { reason } => write!(f, "invalid sample mask: {reason}"),
            Self::ValueMismatch { expected, reason } => {
                write!(f, "expected {expected} value: {reason}")
            }
            Self::InvalidParameters { space, reason } => {
                write!(f, "invalid {space} parameters: {reason}")
            }
            Self::NotFlattenable { space } => write!(f, "{space} space cannot be flattened"),
        }
    }
}

impl Error for SpaceError {}

/// Errors from environment execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvError {
    /// A method was called before the first `reset()`.
    ResetNeeded {
        /// The method that was called too early.
        method: &'static str,
    },
    /// The action is not part of the action space or has the wrong type.
    InvalidAction {
        /// Why the action was rejected.
        reason: String,
    },
    /// The environment has been closed.
    Closed,
    /// The environment's own step or reset logic failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The requested render mode is not declared in the metadata.
    UnsupportedRenderMode {
        /// The rejected mode.
        mode: String,
    },
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResetNeeded { method } => {
                write!(f, "cannot call env.{method}() before calling env.reset()")
            }
            Self::InvalidAction { reason } => write!(f, "invalid action: {reason}"),
            Self::Closed => write!(f, "environment is closed"),
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::UnsupportedRenderMode { mode } => {
                write!(f, "render mode '{mode}' is not supported")
            }
        }
    }
}

impl Error for EnvError {}

/// Errors from the environment registry.
#[derive(Debug)]
pub enum RegistryError {
    /// The id does not match `[namespace/]name[-vN]`.
    MalformedId {
        /// The rejected id.
        id: String,
    },
    /// No environment with this namespace and name is registered.
    NotFound {
        /// The requested id.
        id: String,
    },
    /// The name exists but not at the requested version.
    VersionNotFound {
        /// The requested id.
        id: String,
        /// Versions that are registered for this name.
        available: Vec<u32>,
    },
    /// The requested version is older than the latest registered one
    /// and is no longer registered.
    DeprecatedVersion {
        /// The requested id.
        id: String,
        /// The newest registered id for this name.
        latest: String,
    },
    /// An unversioned id was requested but only versioned ids exist.
    UnversionedNotAllowed {
        /// The requested id.
        id: String,
        /// The newest registered id for this name.
        latest: String,
    },
    /// An `EnvSpec` failed validation.
    InvalidSpec {
        /// Description of the validation failure.
        reason: String,
    },
    /// The entry point failed to construct the environment.
    EntryPoint {
        /// The id being constructed.
        id: String,
        /// The constructor's error.
        source: EnvError,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedId { id } => write!(
                f,
                "malformed environment id '{id}', expected [namespace/]name[-vN]"
            ),
            Self::NotFound { id } => write!(f, "no registered environment with id '{id}'"),
            Self::VersionNotFound { id, available } => write!(
                f,
                "environment version for '{id}' not found, registered versions: {available:?}"
            ),
            Self::DeprecatedVersion { id, latest } => {
                write!(f, "environment '{id}' is out of date, use '{latest}'")
            }
            Self::UnversionedNotAllowed { id, latest } => write!(
                f,
                "environment '{id}' has no unversioned registration, use '{latest}'"
            ),
            Self::InvalidSpec { reason } => write!(f, "invalid environment spec: {reason}"),
            Self::EntryPoint { id, source } => {
                write!(f, "failed to construct '{id}': {source}")
            }
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EntryPoint { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from loading or forwarding a native module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleError {
    /// The native module could not be loaded at all.
    LoadFailed {
        /// Name of the module.
        module: String,
        /// Why loading failed.
        reason: String,
    },
    /// The module's export list names an attribute it does not define.
    MissingSymbol {
        /// Name of the module.
        module: String,
        /// The missing attribute.
        name: String,
    },
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed { module, reason } => {
                write!(f, "failed to load native module '{module}': {reason}")
            }
            Self::MissingSymbol { module, name } => {
                write!(f, "module '{module}' exports '{name}' but does not define it")
            }
        }
    }
}

impl Error for ModuleError {}

/// Any error produced by gymnasium-rs.
#[derive(Debug)]
pub enum GymnasiumError {
    /// A space error.
    Space(SpaceError),
    /// An environment error.
    Env(EnvError),
    /// A registry error.
    Registry(RegistryError),
    /// A native module error.
    Module(ModuleError),
}

impl fmt::Display for GymnasiumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "{e}"),
            Self::Env(e) => write!(f, "{e}"),
            Self::Registry(e) => write!(f, "{e}"),
            Self::Module(e) => write!(f, "{e}"),
        }
    }
}

impl Error for GymnasiumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Env(e) => Some(e),
            Self::Registry(e) => Some(e),
            Self::Module(e) => Some(e),
        }
    }
}

impl From<SpaceError> for GymnasiumError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<EnvError> for GymnasiumError {
    fn from(e: EnvError) -> Self {
        Self::Env(e)
    }
}

impl From<RegistryError> for GymnasiumError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<ModuleError> for GymnasiumError {
    fn from(e: ModuleError) -> Self {
        Self::Module(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_needed_names_the_method() {
        let e = EnvError::ResetNeeded { method: "step" };
        assert_eq!(
            e.to_string(),
            "cannot call env.step() before calling env.reset()"
        );
    }

    #[test]
    fn entry_point_error_exposes_source() {
        let e = RegistryError::EntryPoint {
            id: "Grid-v0".into(),
            source: EnvError::Closed,
        };
        let source = e.source().expect("entry point error has a source");
        assert_eq!(source.to_string(), "environment is closed");
    }

    #[test]
    fn umbrella_preserves_message() {
        let e: GymnasiumError = SpaceError::Empty {
            what: "n must be positive".into(),
        }
        .into();
        assert_eq!(e.to_string(), "space is empty: n must be positive");
        assert!(matches!(e, GymnasiumError::Space(SpaceError::Empty { .. })));
        assert!(e.source().is_some());
    }

    #[test]
    fn shape_mismatch_formats_both_shapes() {
        let e = SpaceError::ShapeMismatch {
            expected: vec![2, 3],
            actual: vec![3],
        };
        assert_eq!(e.to_string(), "shape mismatch: expected [2, 3], got [3]");
    }
}
