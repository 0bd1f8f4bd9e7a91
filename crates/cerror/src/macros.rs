/// Build a [`Fundamental`](crate::Fundamental) from a format string.
///
/// ```
/// let err = cerror::errorf!("user {} not found", 42);
/// assert_eq!(err.to_string(), "user 42 not found");
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::errorf(::std::format_args!($($arg)*))
    };
}

/// Wrap an error with a formatted message.
///
/// ```
/// let err = cerror::wrapf!(cerror::new("db down"), "lookup {} failed", "user");
/// assert_eq!(err.to_string(), "lookup user failed: db down");
/// ```
#[macro_export]
macro_rules! wrapf {
    ($err:expr, $($arg:tt)*) => {
        $crate::wrapf($err, ::std::format_args!($($arg)*))
    };
}

/// Alias of [`wrapf!`].
#[macro_export]
macro_rules! with_messagef {
    ($err:expr, $($arg:tt)*) => {
        $crate::with_messagef($err, ::std::format_args!($($arg)*))
    };
}

/// Build a [`Coded`](crate::Coded) error from a coder and a format string.
///
/// ```
/// use cerror::codes::VALIDATION;
/// let err = cerror::errorf_with_code!(VALIDATION, "field `{}` is required", "email");
/// assert_eq!(err.to_string(), "validation failed: field `email` is required");
/// ```
#[macro_export]
macro_rules! errorf_with_code {
    ($coder:expr, $($arg:tt)*) => {
        $crate::errorf_with_code($coder, ::std::format_args!($($arg)*))
    };
}

/// Early-return a coded error if a condition is false.
///
/// The error is converted with `.into()`, so the enclosing function may
/// return `Result<_, Coded>`, `CResult<_>` or any other type a
/// [`Coded`](crate::Coded) converts into.
///
/// ```
/// use cerror::codes::BAD_REQUEST;
///
/// fn check(age: i32) -> cerror::CResult<i32> {
///     cerror::ensure!(age >= 0, BAD_REQUEST, "negative age {}", age);
///     Ok(age)
/// }
/// assert!(check(3).is_ok());
/// assert_eq!(check(-1).unwrap_err().to_string(), "bad request: negative age -1");
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $coder:expr, $($arg:tt)*) => {
        if !$cond {
            return ::std::result::Result::Err(
                $crate::errorf_with_code($coder, ::std::format_args!($($arg)*)).into(),
            );
        }
    };
}

/// Branch on the outermost coder of an error, comparing by code.
///
/// Arms are tried in order; the final `_` arm also covers errors without a
/// coder. For a boxed error pass `*boxed`.
///
/// ```
/// use cerror::codes::{NOT_FOUND, FORBIDDEN};
///
/// let err = cerror::wrap(cerror::new_with_code(FORBIDDEN, "admin"), "delete user");
/// let status = cerror::match_code!(err, {
///     NOT_FOUND => 404,
///     FORBIDDEN => 403,
///     _ => 500,
/// });
/// assert_eq!(status, 403);
/// ```
#[macro_export]
macro_rules! match_code {
    ($err:expr, { $( $coder:expr => $handler:expr ),* , _ => $default:expr $(,)? }) => {{
        match $crate::get_coder(&$err).map($crate::Coder::code) {
            $( ::std::option::Option::Some(__code) if __code == $coder.code() => $handler, )*
            _ => $default,
        }
    }};
}
