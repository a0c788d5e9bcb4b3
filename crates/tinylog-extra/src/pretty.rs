//! Pretty printing of tuples, sequences and maps
//!
//! Log messages often need to show a collection. [`pretty`] wraps a value in
//! a [`Display`](fmt::Display) adapter with a fixed, compact format:
//!
//! | value                         | output            |
//! |-------------------------------|-------------------|
//! | pair `("k", 5)`               | `k: 5`            |
//! | tuple `(1, 2, 3)`             | `(1, 2, 3)`       |
//! | `Vec`, slice, array, set      | `[1, 2, 3]`       |
//! | `HashMap`, `BTreeMap`         | `{a: 1, b: 2}`    |
//!
//! Collections print at most [`MAX_PRINT_COUNT`] elements; anything beyond
//! is replaced by ` ...` before the closing bracket. Nesting works to any
//! depth since every element is itself printed through [`PrettyPrint`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt::{self, Write};
use std::rc::Rc;
use std::sync::Arc;

/// Elements printed per collection before the ellipsis.
pub const MAX_PRINT_COUNT: usize = 100;

const ELLIPSIS: &str = "...";

/// Values that can be rendered by [`pretty`].
///
/// Implemented for the primitive types, strings, tuples of up to six
/// elements and the standard collections. Implement it for your own types to
/// nest them inside collections.
pub trait PrettyPrint {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// `Display` adapter returned by [`pretty`].
pub struct Pretty<'a, T: ?Sized>(&'a T);

impl<T: PrettyPrint + ?Sized> fmt::Display for Pretty<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.pretty_fmt(f)
    }
}

impl<T: PrettyPrint + ?Sized> fmt::Debug for Pretty<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.pretty_fmt(f)
    }
}

/// Wrap a value for pretty printing.
///
/// ```
/// use tinylog_extra::pretty;
///
/// assert_eq!(pretty(&("k", 5)).to_string(), "k: 5");
/// assert_eq!(pretty(&vec![1, 2, 3]).to_string(), "[1, 2, 3]");
/// ```
pub fn pretty<T: PrettyPrint + ?Sized>(value: &T) -> Pretty<'_, T> {
    Pretty(value)
}

fn write_sequence<I>(f: &mut fmt::Formatter<'_>, open: char, close: char, items: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: PrettyPrint,
{
    let mut items = items.into_iter();
    f.write_char(open)?;
    for (i, item) in items.by_ref().take(MAX_PRINT_COUNT).enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.pretty_fmt(f)?;
    }
    if items.next().is_some() {
        f.write_char(' ')?;
        f.write_str(ELLIPSIS)?;
    }
    f.write_char(close)
}

// ============================================================================
// Scalars
// ============================================================================

macro_rules! impl_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PrettyPrint for $ty {
                fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )+
    };
}

impl_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String,
);

impl<T: PrettyPrint + ?Sized> PrettyPrint for &T {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).pretty_fmt(f)
    }
}

impl<T: PrettyPrint + ?Sized> PrettyPrint for Box<T> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).pretty_fmt(f)
    }
}

impl<T: PrettyPrint + ?Sized> PrettyPrint for Rc<T> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).pretty_fmt(f)
    }
}

impl<T: PrettyPrint + ?Sized> PrettyPrint for Arc<T> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).pretty_fmt(f)
    }
}

// ============================================================================
// Tuples
// ============================================================================

/// A pair is a key and its value.
impl<K: PrettyPrint, V: PrettyPrint> PrettyPrint for (K, V) {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.pretty_fmt(f)?;
        f.write_str(": ")?;
        self.1.pretty_fmt(f)
    }
}

macro_rules! impl_tuple {
    ($head:ident . $h:tt $(, $name:ident . $idx:tt)*) => {
        impl<$head: PrettyPrint $(, $name: PrettyPrint)*> PrettyPrint for ($head, $($name,)*) {
            fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_char('(')?;
                self.$h.pretty_fmt(f)?;
                $(
                    f.write_str(", ")?;
                    self.$idx.pretty_fmt(f)?;
                )*
                f.write_char(')')
            }
        }
    };
}

impl_tuple!(A.0);
impl_tuple!(A.0, B.1, C.2);
impl_tuple!(A.0, B.1, C.2, D.3);
impl_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);

// ============================================================================
// Collections
// ============================================================================

impl<T: PrettyPrint> PrettyPrint for [T] {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '[', ']', self)
    }
}

impl<T: PrettyPrint, const N: usize> PrettyPrint for [T; N] {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '[', ']', self)
    }
}

impl<T: PrettyPrint> PrettyPrint for Vec<T> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '[', ']', self)
    }
}

impl<T: PrettyPrint> PrettyPrint for VecDeque<T> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '[', ']', self)
    }
}

impl<T: PrettyPrint> PrettyPrint for LinkedList<T> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '[', ']', self)
    }
}

impl<T: PrettyPrint> PrettyPrint for BTreeSet<T> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '[', ']', self)
    }
}

impl<T: PrettyPrint, S> PrettyPrint for HashSet<T, S> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '[', ']', self)
    }
}

impl<K: PrettyPrint, V: PrettyPrint> PrettyPrint for BTreeMap<K, V> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '{', '}', self)
    }
}

impl<K: PrettyPrint, V: PrettyPrint, S> PrettyPrint for HashMap<K, V, S> {
    fn pretty_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '{', '}', self)
    }
}
