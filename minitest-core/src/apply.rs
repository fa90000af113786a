//! Positional Argument Tuples
//!
//! Parameterized tests and argument-bound benchmarks both store a tuple of
//! arguments and later call a function with the tuple unpacked. Implemented
//! for tuples of up to eight fields.

use std::fmt::Display;

/// A tuple of displayable fields, rendered as `(v1, v2, ...)`.
pub trait ParamTuple {
    /// Field values in tuple order, using each field's `Display`.
    fn fields(&self) -> Vec<String>;

    /// `"(" + fields joined by ", " + ")"`
    fn describe(&self) -> String {
        format!("({})", self.fields().join(", "))
    }
}

/// A callable that accepts the unpacked fields of `Args`.
///
/// Fields are cloned for every call so the same tuple can be applied repeatedly.
pub trait Apply<Args> {
    /// Return type of the call
    type Output;

    /// Call with the tuple's fields as positional arguments
    fn apply(&self, args: &Args) -> Self::Output;
}

macro_rules! tuple_impls {
    ($( ( $($T:ident $idx:tt),* ) )+) => {
        $(
            impl<$($T: Display),*> ParamTuple for ($($T,)*) {
                #[allow(unused_variables)]
                fn fields(&self) -> Vec<String> {
                    vec![$(self.$idx.to_string()),*]
                }
            }

            impl<Func, Out, $($T: Clone),*> Apply<($($T,)*)> for Func
            where
                Func: Fn($($T),*) -> Out,
            {
                type Output = Out;

                #[allow(unused_variables)]
                fn apply(&self, args: &($($T,)*)) -> Out {
                    (self)($(args.$idx.clone()),*)
                }
            }
        )+
    };
}

tuple_impls! {
    ()
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!((1, 2, 3).describe(), "(1, 2, 3)");
        assert_eq!(("Hello", "World").describe(), "(Hello, World)");
        assert_eq!((6, -2, 4.5).describe(), "(6, -2, 4.5)");
        assert_eq!((42,).describe(), "(42)");
        assert_eq!(().describe(), "()");
    }

    #[test]
    fn test_apply_unpacks_in_order() {
        let sub = |a: i32, b: i32| a - b;
        assert_eq!(sub.apply(&(10, 4)), 6);

        let concat = |a: String, b: String| a + &b;
        let args = ("Mini".to_string(), "Test".to_string());
        assert_eq!(concat.apply(&args), "MiniTest");
        // The tuple is still usable afterwards
        assert_eq!(concat.apply(&args), "MiniTest");
    }

    #[test]
    fn test_apply_fn_item_and_unit() {
        fn add(a: i32, b: i32) -> i32 {
            a + b
        }
        fn answer() -> i32 {
            42
        }
        assert_eq!(add.apply(&(10, 20)), 30);
        assert_eq!(answer.apply(&()), 42);
    }
}
