use anyhow::Context;
use prometheus::register_counter_vec;
use prometheus::CounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_DRAWS_CNTR: CounterVec = register_counter_vec!(
        "quiz_questions_drawn_total",
        "Number of questions handed out by the quiz",
        &["category"]
    )
    .unwrap();
}

/// Directive from `LOG_LEVEL`, `info` when unset. A malformed directive is an error
/// rather than a silent fallback.
fn env_filter(level: Option<String>) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level.as_deref().unwrap_or("info"))
}

pub fn init_tracing() -> anyhow::Result<()> {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = env_filter(std::env::var("LOG_LEVEL").ok())
        .context("LOG_LEVEL is not a valid filter directive")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info() {
        let filter = env_filter(None).unwrap();
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn accepts_module_directives() {
        let filter = env_filter(Some("trivia_api=debug,tower_http=warn".to_owned())).unwrap();
        assert!(filter.to_string().contains("trivia_api=debug"));
    }

    #[test]
    fn rejects_malformed_directives() {
        assert!(env_filter(Some("trivia_api=loud".to_owned())).is_err());
    }
}
