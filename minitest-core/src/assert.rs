//! Assertion Macros
//!
//! Each macro returns `Err(Failure::assertion(..))` from the enclosing test
//! body, so they may only be used inside functions returning `TestResult`.
//! Messages end with `at <file>:<line>`.

/// Fail unless `cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !($cond) {
            return ::core::result::Result::Err($crate::Failure::assertion(::std::format!(
                "{} is false at {}:{}",
                ::core::stringify!($cond),
                ::core::file!(),
                ::core::line!()
            )));
        }
    };
}

/// Fail if `cond` holds.
#[macro_export]
macro_rules! check_false {
    ($cond:expr $(,)?) => {
        if $cond {
            return ::core::result::Result::Err($crate::Failure::assertion(::std::format!(
                "{} is true at {}:{}",
                ::core::stringify!($cond),
                ::core::file!(),
                ::core::line!()
            )));
        }
    };
}

/// Fail unless `actual == expected`.
#[macro_export]
macro_rules! check_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        match (&$actual, &$expected) {
            (actual, expected) => {
                if !(*actual == *expected) {
                    return ::core::result::Result::Err($crate::Failure::assertion(
                        ::std::format!(
                            "{} != {} ({:?} != {:?}) at {}:{}",
                            ::core::stringify!($actual),
                            ::core::stringify!($expected),
                            actual,
                            expected,
                            ::core::file!(),
                            ::core::line!()
                        ),
                    ));
                }
            }
        }
    };
}

/// Fail if `actual == unexpected`.
#[macro_export]
macro_rules! check_ne {
    ($actual:expr, $unexpected:expr $(,)?) => {
        match (&$actual, &$unexpected) {
            (actual, unexpected) => {
                if *actual == *unexpected {
                    return ::core::result::Result::Err($crate::Failure::assertion(
                        ::std::format!(
                            "{} == {} ({:?} == {:?}) at {}:{}",
                            ::core::stringify!($actual),
                            ::core::stringify!($unexpected),
                            actual,
                            unexpected,
                            ::core::file!(),
                            ::core::line!()
                        ),
                    ));
                }
            }
        }
    };
}

/// Fail unless evaluating `expr` panics.
#[macro_export]
macro_rules! check_panics {
    ($expr:expr $(,)?) => {
        if ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| {
            let _ = $expr;
        }))
        .is_ok()
        {
            return ::core::result::Result::Err($crate::Failure::assertion(::std::format!(
                "expected {} to panic at {}:{}",
                ::core::stringify!($expr),
                ::core::file!(),
                ::core::line!()
            )));
        }
    };
}

/// Fail unless `expr` evaluates to `Err(_)`.
#[macro_export]
macro_rules! check_err {
    ($expr:expr $(,)?) => {
        if let ::core::result::Result::Ok(_) = $expr {
            return ::core::result::Result::Err($crate::Failure::assertion(::std::format!(
                "expected {} to return an error at {}:{}",
                ::core::stringify!($expr),
                ::core::file!(),
                ::core::line!()
            )));
        }
    };
}

/// Fail unconditionally.
#[macro_export]
macro_rules! fail {
    ($($arg:tt)+) => {
        return ::core::result::Result::Err($crate::Failure::assertion(::std::format!(
            "{} at {}:{}",
            ::std::format_args!($($arg)+),
            ::core::file!(),
            ::core::line!()
        )))
    };
}
