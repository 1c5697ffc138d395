//! How the active locale is attached to outbound requests.

use campus_core::config::{ApiConfig, LocaleTransportKind};
use campus_core::locale::Locale;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::RequestBuilder;
use std::sync::Arc;

/// Strategy for tagging a request with the UI locale.
///
/// One implementation is chosen for the whole client; call sites never
/// pick their own.
pub trait LocaleTransport: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, request: RequestBuilder, locale: Locale) -> RequestBuilder;
}

/// Sends `Accept-Language: <wire code>`.
#[derive(Debug, Default, Clone)]
pub struct HeaderTransport;

impl LocaleTransport for HeaderTransport {
    fn name(&self) -> &'static str {
        "header"
    }

    fn apply(&self, request: RequestBuilder, locale: Locale) -> RequestBuilder {
        request.header(ACCEPT_LANGUAGE, locale.wire_code())
    }
}

/// Appends `?<param>=<wire code>`.
#[derive(Debug, Clone)]
pub struct QueryTransport {
    param: String,
}

impl QueryTransport {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }
}

impl LocaleTransport for QueryTransport {
    fn name(&self) -> &'static str {
        "query"
    }

    fn apply(&self, request: RequestBuilder, locale: Locale) -> RequestBuilder {
        request.query(&[(self.param.as_str(), locale.wire_code())])
    }
}

/// Build the project-wide transport from config.
pub fn from_config(config: &ApiConfig) -> Arc<dyn LocaleTransport> {
    match config.locale_transport {
        LocaleTransportKind::Header => Arc::new(HeaderTransport),
        LocaleTransportKind::Query => Arc::new(QueryTransport::new(config.query_param.clone())),
    }
}
