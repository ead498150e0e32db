//! Shallow object merge.

use serde_json::{Map, Value};

/// Copies every key of each object in `sources` into `target`, left to right.
///
/// Later sources overwrite earlier ones and the target. Sources that are not
/// objects (`null`, scalars, arrays) are skipped. Values are copied shallowly:
/// a nested object replaces the target's value wholesale.
///
/// # Example
/// ```
/// use serde_json::{json, Map};
/// use rymd_utils::extend;
///
/// let mut target = Map::new();
/// target.insert("a".into(), json!(1));
/// target.insert("b".into(), json!(2));
///
/// extend(&mut target, [&json!({"b": 3, "c": 4})]);
/// assert_eq!(serde_json::Value::Object(target), json!({"a": 1, "b": 3, "c": 4}));
/// ```
pub fn extend<'t, 's, I>(target: &'t mut Map<String, Value>, sources: I) -> &'t mut Map<String, Value>
where
    I: IntoIterator<Item = &'s Value>,
{
    for source in sources {
        if let Value::Object(props) = source {
            for (key, value) in props {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    target
}
