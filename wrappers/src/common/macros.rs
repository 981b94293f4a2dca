//!
//! Literal macros.
//!

/// Builds an [`OrderedMap`](crate::OrderedMap) from `key => value` pairs,
/// in the order written.
///
/// A repeated key keeps its first position and takes the last value.
///
/// ```
/// use emap::omap;
///
/// let m = omap! {
///     "a" => 1,
///     "b" => 2,
///     "a" => 3,
/// };
/// assert_eq!(m.to_pairs(), vec![("a", 3), ("b", 2)]);
///
/// let empty: emap::OrderedMap<u8, u8> = omap! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! omap {
    (@unit $key: expr) => {
        ()
    };
    (@count $($key: expr),+) => {
        <[()]>::len(&[$($crate::omap!(@unit $key)),+])
    };
    () => {
        $crate::OrderedMap::new()
    };
    ($($key: expr => $value: expr),+ $(,)?) => {{
        let mut m = $crate::OrderedMap::with_capacity($crate::omap!(@count $($key),+));
        $(
            m.set($key, $value);
        )+
        m
    }};
}
