//! Re-export namespace over a native module.
//!
//! A [`Namespace`] loads a [`NativeModule`] once and republishes its
//! public surface: the declared export list if there is one, otherwise
//! every attribute whose name does not start with `_`. The module's
//! documentation string is copied verbatim. The module itself is kept
//! behind a private handle and is never reachable by name.
//!
//! ```
//! use std::sync::Arc;
//! use gymnasium::shim::Namespace;
//! use gymnasium::types::{ModuleError, ModuleTable, NativeModule, Symbol};
//!
//! let answer = Symbol::new(42_u32);
//! let native: Arc<dyn NativeModule> = Arc::new(
//!     ModuleTable::builder("demo")
//!         .doc("Demo module.")
//!         .attribute("answer", answer.clone())
//!         .attribute("_private", Symbol::new(()))
//!         .build()?,
//! );
//!
//! let ns = Namespace::forward(native)?;
//! assert_eq!(ns.doc(), "Demo module.");
//! assert_eq!(ns.names().collect::<Vec<_>>(), ["answer"]);
//! assert!(Symbol::ptr_eq(ns.get("answer").unwrap(), &answer));
//! # Ok::<(), ModuleError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use gymnasium_core::{ModuleError, NativeModule, Symbol};
use indexmap::IndexMap;

/// The forwarded public surface of a native module.
///
/// Immutable once built. [`refresh`](Self::refresh) rebuilds it from the
/// retained module handle.
pub struct Namespace {
    name: String,
    doc: String,
    exports: Option<Vec<String>>,
    symbols: IndexMap<String, Symbol>,
    native: Arc<dyn NativeModule>,
}

impl Namespace {
    /// Run `loader` and forward the module it returns.
    ///
    /// A loader error is returned unchanged. Forwarding errors are
    /// converted into the loader's error type.
    pub fn load<F, E>(loader: F) -> Result<Self, E>
    where
        F: FnOnce() -> Result<Arc<dyn NativeModule>, E>,
        E: From<ModuleError>,
    {
        let native = loader()?;
        Ok(Self::forward(native)?)
    }

    /// Forward an already loaded module.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::MissingSymbol`] if the module's export list
    /// names an attribute the module does not define.
    pub fn forward(native: Arc<dyn NativeModule>) -> Result<Self, ModuleError> {
        let symbols = collect_symbols(native.as_ref())?;
        let exports = native.exports().map(<[String]>::to_vec);
        tracing::debug!(
            module = native.name(),
            symbols = symbols.len(),
            explicit_exports = exports.is_some(),
            "forwarded native module"
        );
        Ok(Self {
            name: native.name().to_string(),
            doc: native.doc().to_string(),
            exports,
            symbols,
            native,
        })
    }

    /// Forward the retained module again.
    ///
    /// On error the namespace is left as it was.
    pub fn refresh(&mut self) -> Result<(), ModuleError> {
        *self = Self::forward(Arc::clone(&self.native))?;
        Ok(())
    }

    /// Name of the forwarded module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation copied from the module.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// The module's export list, if it declares one.
    pub fn exports(&self) -> Option<&[String]> {
        self.exports.as_deref()
    }

    /// Forwarded names in forwarding order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.keys().map(String::as_str)
    }

    /// Look up a forwarded symbol.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// `true` if `name` was forwarded.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Number of forwarded symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// `true` if nothing was forwarded.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Forwarded `(name, symbol)` pairs in forwarding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> + '_ {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The retained native module handle.
    #[doc(hidden)]
    pub fn __native(&self) -> &Arc<dyn NativeModule> {
        &self.native
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("exports", &self.exports)
            .field("symbols", &self.symbols.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn collect_symbols(native: &dyn NativeModule) -> Result<IndexMap<String, Symbol>, ModuleError> {
    match native.exports() {
        Some(exports) => exports
            .iter()
            .map(|name| {
                native
                    .attribute(name)
                    .map(|symbol| (name.clone(), symbol))
                    .ok_or_else(|| ModuleError::MissingSymbol {
                        module: native.name().to_string(),
                        name: name.clone(),
                    })
            })
            .collect(),
        None => Ok(native
            .attribute_names()
            .into_iter()
            .filter(|name| !name.starts_with('_'))
            .filter_map(|name| native.attribute(&name).map(|symbol| (name, symbol)))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymnasium_core::ModuleTable;

    fn table(builder: gymnasium_core::ModuleTableBuilder) -> Arc<dyn NativeModule> {
        Arc::new(builder.build_unchecked())
    }

    #[test]
    fn export_list_is_forwarded_in_order() {
        let a = Symbol::new(1_u8);
        let b = Symbol::new(2_u8);
        let native = table(
            ModuleTable::builder("m")
                .attribute("a", a.clone())
                .attribute("b", b.clone())
                .attribute("c", Symbol::new(3_u8))
                .exports(["b", "a"]),
        );
        let ns = Namespace::forward(native).unwrap();
        assert_eq!(ns.names().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(ns.exports().unwrap(), ["b".to_string(), "a".to_string()]);
        assert!(!ns.contains("c"));
        assert!(Symbol::ptr_eq(ns.get("a").unwrap(), &a));
        assert!(Symbol::ptr_eq(ns.get("b").unwrap(), &b));
    }

    #[test]
    fn export_list_may_name_underscored_attributes() {
        let native = table(
            ModuleTable::builder("m")
                .attribute("__version__", Symbol::new("1.0"))
                .exports(["__version__"]),
        );
        let ns = Namespace::forward(native).unwrap();
        assert!(ns.contains("__version__"));
    }

    #[test]
    fn without_export_list_public_attributes_are_forwarded() {
        let native = table(
            ModuleTable::builder("m")
                .attribute("visible", Symbol::new(1_u8))
                .attribute("_hidden", Symbol::new(2_u8))
                .attribute("__dunder__", Symbol::new(3_u8)),
        );
        let ns = Namespace::forward(native).unwrap();
        assert_eq!(ns.names().collect::<Vec<_>>(), ["visible"]);
        assert!(ns.exports().is_none());
    }

    #[test]
    fn missing_export_fails() {
        let native = table(
            ModuleTable::builder("m")
                .attribute("a", Symbol::new(1_u8))
                .exports(["a", "ghost"]),
        );
        let err = Namespace::forward(native).unwrap_err();
        assert_eq!(
            err,
            ModuleError::MissingSymbol {
                module: "m".into(),
                name: "ghost".into()
            }
        );
    }

    #[test]
    fn doc_is_copied_even_when_empty() {
        let ns = Namespace::forward(table(ModuleTable::builder("m"))).unwrap();
        assert_eq!(ns.doc(), "");
        assert!(ns.is_empty());

        let ns = Namespace::forward(table(ModuleTable::builder("m").doc("Docs."))).unwrap();
        assert_eq!(ns.doc(), "Docs.");
    }

    #[test]
    fn native_module_is_not_reachable_by_name() {
        let native = table(ModuleTable::builder("m").attribute("x", Symbol::new(0_u8)));
        let ns = Namespace::forward(Arc::clone(&native)).unwrap();
        assert!(!ns.contains("m"));
        assert!(ns.names().all(|n| n != ns.name()));
        assert!(Arc::ptr_eq(ns.__native(), &native));
    }

    #[test]
    fn loader_error_passes_through() {
        #[derive(Debug, PartialEq)]
        enum LoadError {
            NotBuilt,
            Module(ModuleError),
        }
        impl From<ModuleError> for LoadError {
            fn from(e: ModuleError) -> Self {
                Self::Module(e)
            }
        }

        let err = Namespace::load(|| Err(LoadError::NotBuilt)).unwrap_err();
        assert_eq!(err, LoadError::NotBuilt);

        let err = Namespace::load(|| {
            Ok::<_, LoadError>(table(ModuleTable::builder("m").exports(["ghost"])))
        })
        .unwrap_err();
        assert!(matches!(err, LoadError::Module(ModuleError::MissingSymbol { .. })));
    }

    #[test]
    fn refresh_is_idempotent() {
        let native = table(
            ModuleTable::builder("m")
                .doc("d")
                .export("a", Symbol::new(1_u8))
                .export("b", Symbol::new(2_u8)),
        );
        let mut ns = Namespace::forward(native).unwrap();
        let before: Vec<(String, Symbol)> =
            ns.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        ns.refresh().unwrap();
        ns.refresh().unwrap();
        let after: Vec<(String, Symbol)> =
            ns.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(before.len(), after.len());
        for ((kb, vb), (ka, va)) in before.iter().zip(&after) {
            assert_eq!(kb, ka);
            assert!(Symbol::ptr_eq(vb, va));
        }
        assert_eq!(ns.doc(), "d");
        assert_eq!(ns.exports().unwrap().len(), 2);
    }
}
