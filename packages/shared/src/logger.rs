//! Logging setup utilities for the dashboard client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for the given crate targets.
///
/// Every target gets the same level, e.g. `dashsync_client=info,dashsync=info`.
pub fn default_directive(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `targets` - Crate names that should log at the default level (library and binary)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use dashsync_shared::logger::setup_logger;
///
/// setup_logger(&["dashsync_client", "dashsync"], "info");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(targets, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_joins_targets() {
        // テスト項目: 全ターゲットに同じログレベルが設定される
        // given (前提条件):
        let targets = ["dashsync-client", "dashsync"];

        // when (操作):
        let directive = default_directive(&targets, "debug");

        // then (期待する結果):
        assert_eq!(directive, "dashsync_client=debug,dashsync=debug");
    }

    #[test]
    fn test_default_directive_with_no_targets() {
        // テスト項目: ターゲットが空の場合、空のディレクティブになる
        // given (前提条件):
        let targets: [&str; 0] = [];

        // when (操作):
        let directive = default_directive(&targets, "info");

        // then (期待する結果):
        assert!(directive.is_empty());
    }
}
