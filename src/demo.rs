//! Demo data set.

use kvbatch_core::KeyValue;

/// Default key prefix of the demo data set
pub const DEMO_KEY: &str = "foo";

/// Default number of demo records
pub const DEMO_NUM: usize = 1000;

/// Generate `count` pairs `"{prefix}/{i:06}" -> "value-{i}"`.
///
/// Keys sort in generation order.
///
/// ```
/// let kvs = kvbatch::demo_data("foo", 2);
/// assert_eq!(kvs[1].key, "foo/000001");
/// assert_eq!(kvs[1].value, "value-1");
/// ```
pub fn demo_data(prefix: &str, count: usize) -> Vec<KeyValue> {
    (0..count)
        .map(|i| KeyValue::new(format!("{}/{:06}", prefix, i), format!("value-{}", i)))
        .collect()
}
