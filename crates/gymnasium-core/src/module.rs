//! Model of a native module: a named, documented table of symbols.
//!
//! A [`NativeModule`] exposes a documentation string, an optional
//! explicit export list, and a set of top-level attributes. Attributes
//! are [`Symbol`]s: shared, type-erased values whose identity is the
//! identity of the allocation they point to.

use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ModuleError;

/// A shared, type-erased module attribute.
///
/// Cloning a `Symbol` clones the handle, not the value: all clones are
/// [`ptr_eq`](Symbol::ptr_eq) to each other.
#[derive(Clone)]
pub struct Symbol {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Symbol {
    /// Wrap a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrow the value as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// `true` if the value has type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Name of the wrapped type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `true` if both handles point at the same value.
    pub fn ptr_eq(a: &Symbol, b: &Symbol) -> bool {
        Arc::ptr_eq(&a.value, &b.value)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol<{}>", self.type_name)
    }
}

/// A loaded native module.
///
/// Implementations must be side-effect free to read: the re-export
/// namespace only queries them.
pub trait NativeModule: Send + Sync {
    /// The module's name.
    fn name(&self) -> &str;

    /// The module's top-level documentation string.
    fn doc(&self) -> &str;

    /// The explicit export list, if the module declares one.
    fn exports(&self) -> Option<&[String]>;

    /// Names of all top-level attributes, in definition order.
    fn attribute_names(&self) -> Vec<String>;

    /// Look up a top-level attribute.
    fn attribute(&self, name: &str) -> Option<Symbol>;
}

/// A native module backed by an in-memory table.
///
/// Built with [`ModuleTable::builder`].
///
/// # Examples
///
/// ```
/// use gymnasium_core::{ModuleTable, NativeModule, Symbol};
///
/// let module = ModuleTable::builder("demo")
///     .doc("A demo module.")
///     .export("answer", Symbol::new(42_u32))
///     .attribute("_private", Symbol::new("hidden"))
///     .build()
///     .unwrap();
///
/// assert_eq!(module.doc(), "A demo module.");
/// assert_eq!(module.exports().unwrap(), ["answer".to_string()]);
/// assert_eq!(module.attribute_names(), ["answer", "_private"]);
/// ```
#[derive(Clone, Debug)]
pub struct ModuleTable {
    name: String,
    doc: String,
    exports: Option<Vec<String>>,
    attributes: IndexMap<String, Symbol>,
}

impl ModuleTable {
    /// Start building a module table.
    pub fn builder(name: impl Into<String>) -> ModuleTableBuilder {
        ModuleTableBuilder {
            name: name.into(),
            doc: String::new(),
            exports: None,
            attributes: IndexMap::new(),
        }
    }
}

impl NativeModule for ModuleTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn doc(&self) -> &str {
        &self.doc
    }

    fn exports(&self) -> Option<&[String]> {
        self.exports.as_deref()
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    fn attribute(&self, name: &str) -> Option<Symbol> {
        self.attributes.get(name).cloned()
    }
}

/// Builder for [`ModuleTable`].
pub struct ModuleTableBuilder {
    name: String,
    doc: String,
    exports: Option<Vec<String>>,
    attributes: IndexMap<String, Symbol>,
}

impl ModuleTableBuilder {
    /// Set the documentation string (default: empty).
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Define an attribute without listing it in the export list.
    pub fn attribute(mut self, name: impl Into<String>, symbol: Symbol) -> Self {
        self.attributes.insert(name.into(), symbol);
        self
    }

    /// Define an attribute and append it to the export list.
    ///
    /// Calling this at least once makes the module declare an explicit
    /// export list.
    pub fn export(mut self, name: impl Into<String>, symbol: Symbol) -> Self {
        let name = name.into();
        let exports = self.exports.get_or_insert_with(Vec::new);
        if !exports.contains(&name) {
            exports.push(name.clone());
        }
        self.attributes.insert(name, symbol);
        self
    }

    /// Replace the export list with `names` verbatim.
    ///
    /// Names are not required to be defined yet; [`build`](Self::build)
    /// checks them.
    pub fn exports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exports = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Finish the table.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::MissingSymbol`] if the export list names an
    /// attribute that was never defined.
    pub fn build(self) -> Result<ModuleTable, ModuleError> {
        if let Some(exports) = &self.exports {
            if let Some(missing) = exports.iter().find(|n| !self.attributes.contains_key(*n)) {
                return Err(ModuleError::MissingSymbol {
                    module: self.name,
                    name: missing.clone(),
                });
            }
        }
        Ok(ModuleTable {
            name: self.name,
            doc: self.doc,
            exports: self.exports,
            attributes: self.attributes,
        })
    }

    /// Finish the table without checking the export list.
    ///
    /// Used to model modules whose export list is inconsistent, which a
    /// namespace must then refuse to forward.
    pub fn build_unchecked(self) -> ModuleTable {
        ModuleTable {
            name: self.name,
            doc: self.doc,
            exports: self.exports,
            attributes: self.attributes,
        }
    }
}
