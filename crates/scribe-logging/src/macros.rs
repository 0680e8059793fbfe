//! User-facing logging macros
//!
//! Each macro logs through the `logger` in scope at the call site: a local,
//! a function parameter, or a function returning `&'static Logger` such as one
//! declared with [`define_logger!`]. A field, or any other expression, is
//! passed explicitly with `logger: <expr>,` before the format string.

/// Log at [`Severity::Trace`](crate::Severity::Trace)
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)+) => {
        $crate::__private::log_event!($crate, Trace, "", $($arg)+)
    };
}

/// Log at [`Severity::Debug`](crate::Severity::Debug)
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::__private::log_event!($crate, Debug, "", $($arg)+)
    };
}

/// Log at [`Severity::Info`](crate::Severity::Info)
///
/// ```
/// # use scribe_logging::{LogRegistry, LogConfig, log_info};
/// # let registry = LogRegistry::new(LogConfig::new("doc").with_level_rules("out:console:no_logs"));
/// let logger = registry.logger("net");
/// log_info!("connected to {} in {}ms", "db-1", 12);
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__private::log_event!($crate, Info, "", $($arg)+)
    };
}

/// Log at [`Severity::Warning`](crate::Severity::Warning)
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::__private::log_event!($crate, Warning, "", $($arg)+)
    };
}

/// Log at [`Severity::Error`](crate::Severity::Error), then flush
///
/// With a `"[{}] "` format and a [`DiagnosticSource`](crate::DiagnosticSource)
/// as first argument, the rest of the message also goes to the diagnostics
/// channel.
///
/// ```
/// # use scribe_logging::{LogRegistry, LogConfig, DiagnosticSource, log_error};
/// static MISSING_CONFIG: DiagnosticSource =
///     DiagnosticSource::new("config/missing", "Missing configuration", "Create the file");
///
/// # let registry = LogRegistry::new(LogConfig::new("doc").with_level_rules("out:console:no_logs"));
/// let logger = registry.logger("startup");
/// log_error!("[{}] no file at {}", MISSING_CONFIG, "/etc/app.toml");
/// ```
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__private::log_event!($crate, Error, "", $($arg)+)
    };
}

/// Log at [`Severity::Critical`](crate::Severity::Critical), then flush
#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)+) => {
        $crate::__private::log_event!($crate, Critical, "", $($arg)+)
    };
}

/// Log at an explicit level with a category tag
///
/// ```
/// # use scribe_logging::{LogRegistry, LogConfig, log_with_category};
/// # let registry = LogRegistry::new(LogConfig::new("doc").with_level_rules("out:console:no_logs"));
/// let logger = registry.logger("store");
/// log_with_category!(Warning, "io", "slow write: {}ms", 250);
/// ```
#[macro_export]
macro_rules! log_with_category {
    ($level:ident, $category:literal, $($arg:tt)+) => {
        $crate::__private::log_event!($crate, $level, $category, $($arg)+)
    };
}

/// Declare an accessor returning a lazily created `&'static Logger` on the
/// global registry
///
/// ```
/// use scribe_logging::{define_logger, log_debug};
///
/// define_logger!(fn logger() => "cache");
///
/// fn evict(key: &str) {
///     log_debug!("evicting {}", key);
/// }
/// # evict("k");
/// ```
#[macro_export]
macro_rules! define_logger {
    ($(#[$meta:meta])* $vis:vis fn $name:ident() => $component:expr $(;)?) => {
        $(#[$meta])*
        $vis fn $name() -> &'static $crate::Logger {
            static LOGGER: $crate::__private::Lazy<$crate::Logger> =
                $crate::__private::Lazy::new(|| $crate::Logger::new($component));
            &LOGGER
        }
    };
}
