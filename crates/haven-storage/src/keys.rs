//! Record key construction.
//!
//! Keys are versioned so a future schema change can migrate records
//! side by side instead of corrupting old installs.

/// Key of the singleton profile record.
pub const PROFILE: &str = "haven.profile.v1";

/// Key of the thread registry record (JSON array of thread metadata).
pub const THREADS: &str = "haven.threads.v1";

const THREAD_LOG_PREFIX: &str = "haven.thread.v1.";

/// Key of the message log owned by the given thread.
pub fn thread_log(thread_id: &str) -> String {
    format!("{THREAD_LOG_PREFIX}{thread_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_log_keys_are_distinct_per_thread() {
        assert_eq!(thread_log("default"), "haven.thread.v1.default");
        assert_ne!(thread_log("a"), thread_log("b"));
    }
}
