//! Logging macros
//!
//! Every macro takes an optional leading `target: <logger>` where the logger
//! is anything implementing [`IntoLogger`](crate::capture::IntoLogger): an
//! `Arc<Logger>` or a registered name. Without a target the registry's
//! default logger is used.
//!
//! The call site's file, line and module are attached to every record, and
//! verbose sinks print them. Building with the `cancel-verbose` feature stops
//! the capture entirely.

#[doc(hidden)]
#[macro_export]
macro_rules! __tinylog_location {
    () => {
        if $crate::capture::CAPTURE_LOCATION {
            ::std::option::Option::Some($crate::capture::Location::new(
                ::std::file!(),
                ::std::line!(),
                ::std::module_path!(),
            ))
        } else {
            ::std::option::Option::None
        }
    };
}

/// Log a formatted message at `level`.
///
/// ```ignore
/// logf!(Level::Info, "listening on {}", addr);
/// logf!(target: "net", Level::Warn, "retry {attempt}/{max}");
/// ```
#[macro_export]
macro_rules! logf {
    (target: $target:expr, $level:expr, $($arg:tt)+) => {{
        let __capture = $crate::capture::LogFormat::new($target, $level);
        if __capture.is_enabled() {
            __capture
                .with_location($crate::__tinylog_location!())
                .emit(::std::format_args!($($arg)+));
        }
    }};
    ($level:expr, $($arg:tt)+) => {
        $crate::logf!(target: $crate::capture::DefaultTarget, $level, $($arg)+)
    };
}

/// Like [`logf!`], but does nothing at all unless `cond` is true.
#[macro_export]
macro_rules! logf_if {
    (target: $target:expr, $level:expr, $cond:expr, $($arg:tt)+) => {
        if $cond {
            $crate::logf!(target: $target, $level, $($arg)+);
        }
    };
    ($level:expr, $cond:expr, $($arg:tt)+) => {
        if $cond {
            $crate::logf!($level, $($arg)+);
        }
    };
}

#[macro_export]
macro_rules! log_trace {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::logf!(target: $target, $crate::Level::Trace, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::logf!(target: $target, $crate::Level::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::logf!(target: $target, $crate::Level::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::logf!(target: $target, $crate::Level::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::logf!(target: $target, $crate::Level::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_fatal {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::logf!(target: $target, $crate::Level::Fatal, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Level::Fatal, $($arg)+)
    };
}

/// Start a [`LogStream`](crate::capture::LogStream) at `level`.
///
/// ```ignore
/// logs!(Level::Info).append("loaded ").append(n).append(" items");
/// ```
#[macro_export]
macro_rules! logs {
    (target: $target:expr, $level:expr) => {
        $crate::capture::LogStream::new($target, $level)
            .with_location($crate::__tinylog_location!())
    };
    ($level:expr) => {
        $crate::logs!(target: $crate::capture::DefaultTarget, $level)
    };
}

/// A [`LogStream`](crate::capture::LogStream) that is inert unless `cond` holds.
///
/// The target is not even looked up when `cond` is false.
#[macro_export]
macro_rules! logs_if {
    (target: $target:expr, $level:expr, $cond:expr) => {
        if $cond {
            $crate::logs!(target: $target, $level)
        } else {
            $crate::capture::LogStream::disabled()
        }
    };
    ($level:expr, $cond:expr) => {
        $crate::logs_if!(target: $crate::capture::DefaultTarget, $level, $cond)
    };
}

/// Start a [`WideLogStream`](crate::capture::WideLogStream) at `level`.
#[macro_export]
macro_rules! wlogs {
    (target: $target:expr, $level:expr) => {
        $crate::capture::WideLogStream::new($target, $level)
            .with_location($crate::__tinylog_location!())
    };
    ($level:expr) => {
        $crate::wlogs!(target: $crate::capture::DefaultTarget, $level)
    };
}

/// A [`WideLogStream`](crate::capture::WideLogStream) that is inert unless
/// `cond` holds.
#[macro_export]
macro_rules! wlogs_if {
    (target: $target:expr, $level:expr, $cond:expr) => {
        if $cond {
            $crate::wlogs!(target: $target, $level)
        } else {
            $crate::capture::WideLogStream::disabled()
        }
    };
    ($level:expr, $cond:expr) => {
        $crate::wlogs_if!(target: $crate::capture::DefaultTarget, $level, $cond)
    };
}
