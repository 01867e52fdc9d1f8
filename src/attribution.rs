//! Campaign and click attribution for the current page view.
//!
//! The lookups are pure functions over the raw query string and cookie header
//! so they can be exercised without a browser. [`PageEnvironment::from_window`]
//! and [`IpifyLookup`] are the only parts that touch the DOM or the network.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::config;
use crate::error::FunnelError;

const CLICK_ID_PREFIX: &str = "fb";
const CLICK_ID_SUBDOMAIN_INDEX: u8 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: String,
    pub utm_content: String,
}

impl UtmParams {
    pub fn from_query(query: &str) -> Self {
        let get = |key: &str| query_param(query, key).unwrap_or_default();
        UtmParams {
            utm_source: get("utm_source"),
            utm_medium: get("utm_medium"),
            utm_campaign: get("utm_campaign"),
            utm_term: get("utm_term"),
            utm_content: get("utm_content"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionSnapshot {
    #[serde(flatten)]
    pub utm: UtmParams,
    pub fbc: String,
    pub fbp: String,
    pub client_ip_address: String,
    pub client_user_agent: String,
    pub page_url: String,
    pub page_referrer: String,
    pub page_title: String,
}

/// Raw facts read from the browser once per page view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageEnvironment {
    /// `location.search`, with or without the leading `?`.
    pub query: String,
    /// `document.cookie`.
    pub cookies: String,
    pub user_agent: String,
    pub referrer: String,
    pub url: String,
    pub title: String,
}

impl PageEnvironment {
    pub fn from_window() -> Result<Self, FunnelError> {
        let window = web_sys::window()
            .ok_or_else(|| FunnelError::Environment("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| FunnelError::Environment("no document".to_string()))?;
        let location = window.location();

        let cookies = document
            .clone()
            .dyn_into::<HtmlDocument>()
            .ok()
            .and_then(|html| html.cookie().ok())
            .unwrap_or_default();

        Ok(PageEnvironment {
            query: location.search().unwrap_or_default(),
            cookies,
            user_agent: window.navigator().user_agent().unwrap_or_default(),
            referrer: document.referrer(),
            url: location.href().unwrap_or_default(),
            title: document.title(),
        })
    }
}

/// Returns the first value of `key` in a URL query string, percent-decoded.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k) == key).then(|| decode_component(v))
        })
        .next()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

/// Looks up a cookie by name in a `document.cookie` style header.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Click id for the conversion API. An existing `_fbc` cookie wins, otherwise
/// one is built from `fbclid` as `fb.1.<unix seconds>.<fbclid>`.
pub fn click_id(existing: Option<&str>, fbclid: Option<&str>, now_secs: i64) -> String {
    match (existing, fbclid) {
        (Some(cookie), _) if !cookie.is_empty() => cookie.to_string(),
        (_, Some(id)) if !id.is_empty() => format!(
            "{}.{}.{}.{}",
            CLICK_ID_PREFIX, CLICK_ID_SUBDOMAIN_INDEX, now_secs, id
        ),
        _ => String::new(),
    }
}

#[async_trait(?Send)]
pub trait IpLookup {
    async fn lookup(&self) -> Result<String, FunnelError>;
}

#[derive(Deserialize)]
struct IpResponse {
    #[serde(default)]
    ip: String,
}

pub struct IpifyLookup {
    url: String,
}

impl Default for IpifyLookup {
    fn default() -> Self {
        IpifyLookup {
            url: config::IP_LOOKUP_URL.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl IpLookup for IpifyLookup {
    async fn lookup(&self) -> Result<String, FunnelError> {
        let response = Request::get(&self.url).send().await?;
        if !response.ok() {
            return Err(FunnelError::Rejected {
                status: response.status(),
            });
        }
        let body: IpResponse = response.json().await?;
        Ok(body.ip)
    }
}

/// Source of the attribution snapshot merged into every lead.
#[async_trait(?Send)]
pub trait AttributionProvider {
    /// Never fails: anything that cannot be determined is an empty string.
    async fn collect(&self) -> AttributionSnapshot;
}

pub struct Collector<I> {
    env: PageEnvironment,
    ip: I,
}

impl<I: IpLookup> Collector<I> {
    pub fn new(env: PageEnvironment, ip: I) -> Self {
        Collector { env, ip }
    }

    fn snapshot_at(&self, now_secs: i64, client_ip_address: String) -> AttributionSnapshot {
        let env = &self.env;
        let existing_fbc = cookie_value(&env.cookies, config::FBC_COOKIE);
        let fbclid = query_param(&env.query, "fbclid");

        AttributionSnapshot {
            utm: UtmParams::from_query(&env.query),
            fbc: click_id(existing_fbc.as_deref(), fbclid.as_deref(), now_secs),
            fbp: cookie_value(&env.cookies, config::FBP_COOKIE).unwrap_or_default(),
            client_ip_address,
            client_user_agent: env.user_agent.clone(),
            page_url: env.url.clone(),
            page_referrer: env.referrer.clone(),
            page_title: env.title.clone(),
        }
    }
}

#[async_trait(?Send)]
impl<I: IpLookup> AttributionProvider for Collector<I> {
    async fn collect(&self) -> AttributionSnapshot {
        let client_ip = match self.ip.lookup().await {
            Ok(ip) => ip,
            Err(e) => {
                log::warn!("Could not fetch IP address: {}", e);
                String::new()
            }
        };
        self.snapshot_at(chrono::Utc::now().timestamp(), client_ip)
    }
}

/// Production provider: reads the live page and asks ipify for the address.
pub struct BrowserAttribution;

#[async_trait(?Send)]
impl AttributionProvider for BrowserAttribution {
    async fn collect(&self) -> AttributionSnapshot {
        let env = PageEnvironment::from_window().unwrap_or_else(|e| {
            log::warn!("Reading page environment failed: {}", e);
            PageEnvironment::default()
        });
        Collector::new(env, IpifyLookup::default()).collect().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_log;
    use futures::executor::block_on;
    use log::Level;
    use regex::Regex;

    struct FixedIp(&'static str);

    #[async_trait(?Send)]
    impl IpLookup for FixedIp {
        async fn lookup(&self) -> Result<String, FunnelError> {
            Ok(self.0.to_string())
        }
    }

    struct UnreachableIp;

    #[async_trait(?Send)]
    impl IpLookup for UnreachableIp {
        async fn lookup(&self) -> Result<String, FunnelError> {
            Err(FunnelError::Network("connection refused".to_string()))
        }
    }

    fn env(query: &str, cookies: &str) -> PageEnvironment {
        PageEnvironment {
            query: query.to_string(),
            cookies: cookies.to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
            referrer: "https://facebook.com/".to_string(),
            url: format!("https://funnel.example/{}", query),
            title: "DM Champ".to_string(),
        }
    }

    #[test]
    fn missing_utm_params_become_empty_strings() {
        let utm = UtmParams::from_query("?utm_source=ads&utm_campaign=x");
        assert_eq!(
            utm,
            UtmParams {
                utm_source: "ads".to_string(),
                utm_medium: String::new(),
                utm_campaign: "x".to_string(),
                utm_term: String::new(),
                utm_content: String::new(),
            }
        );
    }

    #[test]
    fn query_values_are_decoded() {
        assert_eq!(
            query_param("utm_content=summer+sale%21&name=Jan", "utm_content").as_deref(),
            Some("summer sale!")
        );
        assert_eq!(query_param("flag&name=Jan", "flag").as_deref(), Some(""));
        assert_eq!(query_param("", "name"), None);
    }

    #[test]
    fn cookies_are_matched_by_exact_name() {
        let cookies = "x_fbp=nope; _fbp=fb.1.1700000000.42; theme=dark";
        assert_eq!(cookie_value(cookies, "_fbp").as_deref(), Some("fb.1.1700000000.42"));
        assert_eq!(cookie_value(cookies, "_fbc"), None);
    }

    #[test]
    fn click_id_is_synthesized_from_fbclid() {
        let fbc = click_id(None, Some("abc123"), 1_718_000_000);
        let pattern = Regex::new(r"^fb\.1\.\d{10}\.abc123$").unwrap();
        assert!(pattern.is_match(&fbc), "unexpected click id {fbc}");
    }

    #[test]
    fn existing_click_cookie_wins_over_fbclid() {
        assert_eq!(click_id(Some("fb.1.1.old"), Some("new"), 5), "fb.1.1.old");
        assert_eq!(click_id(Some(""), None, 5), "");
        assert_eq!(click_id(None, None, 5), "");
    }

    #[test]
    fn collector_builds_complete_snapshot() {
        let collector = Collector::new(
            env("?utm_source=ads&fbclid=abc123", "_fbp=fb.1.99.77"),
            FixedIp("203.0.113.9"),
        );
        let snapshot = block_on(collector.collect());

        assert_eq!(snapshot.utm.utm_source, "ads");
        assert_eq!(snapshot.utm.utm_medium, "");
        assert_eq!(snapshot.fbp, "fb.1.99.77");
        assert!(Regex::new(r"^fb\.1\.\d{10}\.abc123$").unwrap().is_match(&snapshot.fbc));
        assert_eq!(snapshot.client_ip_address, "203.0.113.9");
        assert_eq!(snapshot.page_title, "DM Champ");
        assert_eq!(snapshot.page_referrer, "https://facebook.com/");
    }

    #[test]
    fn ip_lookup_failure_leaves_ip_empty() {
        test_log::capture();
        let collector = Collector::new(env("", ""), UnreachableIp);
        let snapshot = block_on(collector.collect());
        assert_eq!(snapshot.client_ip_address, "");
        assert_eq!(snapshot.fbc, "");
        assert_eq!(snapshot.client_user_agent, "Mozilla/5.0 (X11; Linux x86_64)");
        assert_eq!(
            test_log::messages_at(Level::Warn),
            vec!["Could not fetch IP address: network error: connection refused".to_string()]
        );
        assert!(test_log::messages_at(Level::Error).is_empty());
    }

    #[test]
    fn snapshot_serializes_flat() {
        let snapshot = Collector::new(env("?utm_term=crm", ""), FixedIp("1.2.3.4"))
            .snapshot_at(1_718_000_000, "1.2.3.4".to_string());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["utm_term"], "crm");
        assert_eq!(json["utm_source"], "");
        assert_eq!(json["client_ip_address"], "1.2.3.4");
        assert!(json.get("utm").is_none());
    }
}
