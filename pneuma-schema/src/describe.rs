//! The [`Describe`] trait and its implementations for std types.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::node::SchemaNode;

/// Sentinel returned by [`name_of`] when there is no instance.
pub const NIL_NAME: &str = "<nil>";

/// A type that knows its own schema.
///
/// Records get this from `#[derive(Describe)]`; scalars, sequences and the
/// common wrappers are covered here. Implement it by hand with the
/// [`SchemaNode`] builder when a derive does not fit.
///
/// Self-referential types are not supported: [`Describe::schema`] would
/// recurse forever.
pub trait Describe {
    /// Declared type name, used as the logical object name of a schema.
    const NAME: &'static str;

    /// The schema of this type. Pure and deterministic.
    fn schema() -> SchemaNode;

    /// Move the values of fields the schema leaves out from `prior` into
    /// `self`.
    ///
    /// A freshly decoded value carries defaults for fields serde skips;
    /// this hands the caller's values back before the decoded value replaces
    /// `prior`. The derive implements it for skipped fields and nested
    /// records. The default does nothing.
    fn restore_skipped(&mut self, _prior: &mut Self) {}
}

/// Derive the schema document of `T`.
#[must_use]
pub fn schema_for<T: Describe + ?Sized>() -> SchemaNode {
    T::schema()
}

/// Declared type name of an instance, or `"<nil>"` when there is none.
///
/// References, `Box`, `Rc` and `Arc` are transparent, so
/// `name_of(Some(&&pet)) == name_of(Some(&pet))`.
pub fn name_of<T: Describe + ?Sized>(instance: Option<&T>) -> &'static str {
    match instance {
        Some(_) => T::NAME,
        None => NIL_NAME,
    }
}

macro_rules! describe_scalar {
    ($builder:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                const NAME: &'static str = stringify!($ty);

                fn schema() -> SchemaNode {
                    SchemaNode::$builder()
                }
            }
        )+
    };
}

describe_scalar!(string => String, str, char);
describe_scalar!(integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_scalar!(number => f32, f64);
describe_scalar!(boolean => bool);

impl Describe for serde_json::Value {
    const NAME: &'static str = "Value";

    fn schema() -> SchemaNode {
        SchemaNode::opaque()
    }
}

impl Describe for () {
    const NAME: &'static str = "()";

    fn schema() -> SchemaNode {
        SchemaNode::opaque()
    }
}

impl<K, V> Describe for HashMap<K, V> {
    const NAME: &'static str = "HashMap";

    fn schema() -> SchemaNode {
        SchemaNode::opaque()
    }
}

impl<K, V> Describe for BTreeMap<K, V> {
    const NAME: &'static str = "BTreeMap";

    fn schema() -> SchemaNode {
        SchemaNode::opaque()
    }
}

impl<T: Describe> Describe for Vec<T> {
    const NAME: &'static str = "Vec";

    fn schema() -> SchemaNode {
        SchemaNode::array(T::schema())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    const NAME: &'static str = "VecDeque";

    fn schema() -> SchemaNode {
        SchemaNode::array(T::schema())
    }
}

impl<T: Describe> Describe for [T] {
    const NAME: &'static str = "slice";

    fn schema() -> SchemaNode {
        SchemaNode::array(T::schema())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    const NAME: &'static str = "array";

    fn schema() -> SchemaNode {
        SchemaNode::array(T::schema())
    }
}

// Every field is required, so an optional field is described by its inner
// type and the model always supplies a value.
impl<T: Describe> Describe for Option<T> {
    const NAME: &'static str = T::NAME;

    fn schema() -> SchemaNode {
        T::schema()
    }

    fn restore_skipped(&mut self, prior: &mut Self) {
        if let (Some(decoded), Some(prior)) = (self, prior) {
            T::restore_skipped(decoded, prior);
        }
    }
}

macro_rules! describe_transparent {
    ($($wrapper:ident),+ $(,)?) => {
        $(
            impl<T: Describe + ?Sized> Describe for $wrapper<T> {
                const NAME: &'static str = T::NAME;

                fn schema() -> SchemaNode {
                    T::schema()
                }
            }
        )+
    };
}

// Shared pointers cannot hand out `&mut`, so skipped fields behind them are
// not restored.
describe_transparent!(Rc, Arc);

impl<T: Describe + ?Sized> Describe for Box<T> {
    const NAME: &'static str = T::NAME;

    fn schema() -> SchemaNode {
        T::schema()
    }

    fn restore_skipped(&mut self, prior: &mut Self) {
        T::restore_skipped(&mut **self, &mut **prior);
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    const NAME: &'static str = T::NAME;

    fn schema() -> SchemaNode {
        T::schema()
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    const NAME: &'static str = T::NAME;

    fn schema() -> SchemaNode {
        T::schema()
    }

    fn restore_skipped(&mut self, prior: &mut Self) {
        T::restore_skipped(&mut **self, &mut **prior);
    }
}
