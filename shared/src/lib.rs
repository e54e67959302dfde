pub mod config;
pub mod logging;
pub mod speech;
pub mod timefmt;

/// Install the global tracing subscriber for the calling binary.
#[macro_export]
macro_rules! init_tracing {
    () => {
        $crate::logging::init()
    };
}
