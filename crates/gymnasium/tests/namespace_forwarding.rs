//! Forwarding properties of the re-export namespace, over generated
//! module tables and over the crate's own native module.

use std::sync::Arc;

use gymnasium::native::{MakeFn, MODULE_DOC};
use gymnasium::shim::Namespace;
use gymnasium::spaces::{Space, SpaceFactory};
use gymnasium::types::{ModuleError, ModuleTable, NativeModule, Symbol};
use gymnasium_test_utils::countdown_spec;
use proptest::prelude::*;

fn module_strategy() -> impl Strategy<Value = (ModuleTable, Vec<String>)> {
    (
        prop::collection::btree_set("_{0,2}[a-z]{1,6}", 0..12),
        any::<bool>(),
        ".{0,24}",
    )
        .prop_map(|(names, explicit, doc)| {
            let names: Vec<String> = names.into_iter().collect();
            let mut builder = ModuleTable::builder("generated").doc(doc);
            for (i, name) in names.iter().enumerate() {
                builder = builder.attribute(name.clone(), Symbol::new(i));
            }
            if explicit {
                let exported: Vec<String> = names.iter().step_by(2).cloned().collect();
                builder = builder.exports(exported);
            }
            (builder.build_unchecked(), names)
        })
}

proptest! {
    #[test]
    fn forwarded_symbols_are_identical_objects((table, names) in module_strategy()) {
        let native: Arc<dyn NativeModule> = Arc::new(table);
        let ns = Namespace::forward(Arc::clone(&native)).unwrap();

        prop_assert_eq!(ns.doc(), native.doc());
        prop_assert_eq!(ns.exports(), native.exports());
        for (name, symbol) in ns.iter() {
            let original = native.attribute(name).unwrap();
            prop_assert!(Symbol::ptr_eq(symbol, &original));
        }

        let expected: Vec<&str> = match native.exports() {
            Some(exports) => exports.iter().map(String::as_str).collect(),
            None => names.iter().map(String::as_str).filter(|n| !n.starts_with('_')).collect(),
        };
        prop_assert_eq!(ns.names().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn refresh_leaves_namespace_unchanged((table, _names) in module_strategy()) {
        let mut ns = Namespace::forward(Arc::new(table)).unwrap();
        let names: Vec<String> = ns.names().map(String::from).collect();
        let doc = ns.doc().to_string();
        let exports = ns.exports().map(<[String]>::to_vec);
        ns.refresh().unwrap();
        prop_assert_eq!(ns.names().map(String::from).collect::<Vec<_>>(), names);
        prop_assert_eq!(ns.doc(), doc.as_str());
        prop_assert_eq!(ns.exports().map(<[String]>::to_vec), exports);
    }
}

#[test]
fn failed_load_produces_no_namespace() {
    let result = Namespace::load(|| {
        Err::<Arc<dyn NativeModule>, _>(ModuleError::LoadFailed {
            module: "gymnasium_rs".into(),
            reason: "extension not built".into(),
        })
    });
    assert_eq!(
        result.unwrap_err(),
        ModuleError::LoadFailed {
            module: "gymnasium_rs".into(),
            reason: "extension not built".into(),
        }
    );
}

#[test]
fn global_namespace_exposes_factories() {
    let ns = gymnasium::namespace().unwrap();
    assert_eq!(ns.doc(), MODULE_DOC);
    let factory = ns.get("MultiDiscrete").unwrap().downcast_ref::<SpaceFactory>().unwrap();
    let mut space = factory
        .build(&serde_json::json!({"nvec": [3, 4]}), Some(11))
        .unwrap();
    let sample = space.sample();
    assert!(space.contains(&sample));
}

#[test]
fn global_namespace_make_reaches_default_registry() {
    gymnasium::envs::register(countdown_spec("shim/Countdown-v0").build().unwrap());
    let ns = gymnasium::namespace().unwrap();
    let make = ns.get("make").unwrap().downcast_ref::<MakeFn>().unwrap();
    let mut env = make("shim/Countdown-v0", None).unwrap();
    use gymnasium::envs::Env;
    let (obs, _) = env.reset(None, None).unwrap();
    assert_eq!(obs, gymnasium::spaces::Value::Int(3));
}
