use tracing_subscriber::EnvFilter;

/// Targets that get the verbosity level; everything else (serenity, hyper) stays at warn.
const CRATE_TARGETS: &[&str] = &["goonbot"];

/// Initialize tracing from the CLI verbosity count.
///
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `RUST_LOG` overrides the flag when set.
pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATE_TARGETS.iter().map(|t| format!("{t}={level}")));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_crate_level() {
        assert_eq!(default_filter(0), "warn,goonbot=warn");
        assert_eq!(default_filter(1), "warn,goonbot=info");
        assert_eq!(default_filter(2), "warn,goonbot=debug");
        assert_eq!(default_filter(7), "warn,goonbot=trace");
    }
}
