//! Profiling utilities for query rendering and path resolution
//!
//! This module provides integration with the puffin profiler to track
//! rendering and resolution cost when the "profiling" feature is enabled.

/// Generic profiling scope macro for high-level operation instrumentation.
#[macro_export]
macro_rules! relquery_profile_scope {
    ($category:literal, $operation:literal) => {
        #[cfg(feature = "profiling")]
        puffin::profile_scope!($category, $operation);
    };
}
