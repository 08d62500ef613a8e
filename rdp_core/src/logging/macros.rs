//! Logging macros taking a `Code` and `"key" => value` context pairs
//!
//! Context values may be any `Display` type. Nothing is formatted when no
//! global logger is installed, and debug context only at debug level.

/// Collect `"key" => value` pairs into owned context
#[doc(hidden)]
#[macro_export]
macro_rules! log_context {
    ($($key:expr => $value:expr),*) => {
        if $crate::logging::is_initialized() {
            vec![$(($key, ($value).to_string())),*]
        } else {
            Vec::new()
        }
    };
}

/// Log an error with a code, an optional source span and context
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            Some($span),
            $crate::log_context!($($key => $value),*),
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            None,
            $crate::log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_success_with_context(
            $code,
            $message,
            $crate::log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_info_with_context($message, $crate::log_context!($($key => $value),*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_warning_with_context(
            $message,
            $crate::log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::log_debug_with_context(
                $message,
                $crate::log_context!($($key => $value),*),
            )
        }
    };
}
