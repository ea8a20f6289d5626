//! User-agent decomposition.

use pixeltrace_core::types::ParsedUserAgent;
use pixeltrace_core::types::user_agent::UNKNOWN;

/// Splits a raw `User-Agent` string into browser, version, OS, and platform.
pub trait UserAgentParser: Send + Sync + std::fmt::Debug {
    /// Never fails; unrecognized parts come back as `"unknown"`.
    fn parse(&self, user_agent: &str) -> ParsedUserAgent;
}

/// Token-matching parser covering mainstream browsers, CLI clients, and
/// well-known crawlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinUserAgentParser;

/// Crawler tokens and the display name recorded for them.
const BOTS: &[(&str, &str)] = &[
    ("Googlebot/", "Googlebot"),
    ("bingbot/", "Bingbot"),
    ("DuckDuckBot/", "DuckDuckBot"),
    ("YandexBot/", "YandexBot"),
    ("Baiduspider/", "Baiduspider"),
    ("facebookexternalhit/", "Facebook"),
    ("Twitterbot/", "Twitterbot"),
    ("Slackbot", "Slackbot"),
];

/// HTTP tools that identify themselves with `name/version`.
const TOOLS: &[(&str, &str)] = &[
    ("curl/", "curl"),
    ("Wget/", "Wget"),
    ("python-requests/", "python-requests"),
    ("PostmanRuntime/", "Postman"),
    ("okhttp/", "okhttp"),
];

/// Browser tokens in match order: more specific forks before the engines
/// they embed (Edge and Opera both also claim Chrome and Safari).
const BROWSERS: &[(&str, &str)] = &[
    ("Edg/", "Edge"),
    ("EdgA/", "Edge"),
    ("EdgiOS/", "Edge"),
    ("Edge/", "Edge"),
    ("OPR/", "Opera"),
    ("Opera/", "Opera"),
    ("SamsungBrowser/", "Samsung Internet"),
    ("FxiOS/", "Firefox"),
    ("Firefox/", "Firefox"),
    ("CriOS/", "Chrome"),
    ("Chromium/", "Chromium"),
    ("Chrome/", "Chrome"),
];

impl UserAgentParser for BuiltinUserAgentParser {
    fn parse(&self, user_agent: &str) -> ParsedUserAgent {
        let ua = user_agent.trim();
        if ua.is_empty() || ua.eq_ignore_ascii_case(UNKNOWN) {
            return ParsedUserAgent::default();
        }

        let os = detect_os(ua);

        if let Some((browser, version)) = detect_bot(ua) {
            return ParsedUserAgent {
                browser,
                version,
                os: os.unwrap_or(UNKNOWN).to_string(),
                platform: "bot".to_string(),
            };
        }

        let (browser, version) = detect_browser(ua)
            .or_else(|| match_token(ua, TOOLS))
            .unwrap_or_else(|| (UNKNOWN.to_string(), UNKNOWN.to_string()));

        ParsedUserAgent {
            browser,
            version,
            os: os.unwrap_or(UNKNOWN).to_string(),
            platform: detect_platform(ua, os).to_string(),
        }
    }
}

/// Generic crawler words. They must name a product (`AhrefsBot/7.0`) or
/// stand alone (`compatible; bot;`), never sit inside a device model.
const CRAWLER_WORDS: &[&str] = &["bot", "crawler", "spider"];

fn detect_bot(ua: &str) -> Option<(String, String)> {
    if let Some(found) = match_token(ua, BOTS) {
        return Some(found);
    }
    ua.split(|c: char| c.is_whitespace() || matches!(c, ';' | '(' | ')' | ','))
        .any(is_crawler_token)
        .then(|| ("Bot".to_string(), UNKNOWN.to_string()))
}

fn is_crawler_token(token: &str) -> bool {
    let (name, versioned) = match token.split_once('/') {
        Some((name, _)) => (name, true),
        None => (token, false),
    };
    let name = name.to_ascii_lowercase();
    CRAWLER_WORDS.iter().any(|word| {
        if versioned {
            name.ends_with(word)
        } else {
            name == *word
        }
    })
}

fn detect_browser(ua: &str) -> Option<(String, String)> {
    if let Some(found) = match_token(ua, BROWSERS) {
        return Some(found);
    }

    if ua.contains("Safari/") {
        let version = version_after(ua, "Version/").unwrap_or_else(|| UNKNOWN.to_string());
        return Some(("Safari".to_string(), version));
    }

    if let Some(version) = version_after(ua, "MSIE ") {
        return Some(("Internet Explorer".to_string(), version));
    }
    if ua.contains("Trident/") {
        let version = version_after(ua, "rv:").unwrap_or_else(|| UNKNOWN.to_string());
        return Some(("Internet Explorer".to_string(), version));
    }

    None
}

fn detect_os(ua: &str) -> Option<&'static str> {
    if ua.contains("Windows") {
        Some("Windows")
    } else if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("iPod") {
        Some("iOS")
    } else if ua.contains("Android") {
        Some("Android")
    } else if ua.contains("CrOS") {
        Some("Chrome OS")
    } else if ua.contains("Mac OS X") || ua.contains("Macintosh") {
        Some("macOS")
    } else if ua.contains("Linux") {
        Some("Linux")
    } else {
        None
    }
}

fn detect_platform(ua: &str, os: Option<&str>) -> &'static str {
    let android_tablet = ua.contains("Android") && !ua.contains("Mobile");
    if ua.contains("iPad") || ua.contains("Tablet") || android_tablet {
        return "tablet";
    }
    if ua.contains("Mobi") || ua.contains("iPhone") || ua.contains("iPod") {
        return "mobile";
    }
    match os {
        Some("Windows" | "macOS" | "Linux" | "Chrome OS") => "desktop",
        _ => UNKNOWN,
    }
}

fn match_token(ua: &str, table: &[(&str, &str)]) -> Option<(String, String)> {
    table.iter().find(|(token, _)| ua.contains(token)).map(|(token, name)| {
        let version = version_after(ua, token).unwrap_or_else(|| UNKNOWN.to_string());
        (name.to_string(), version)
    })
}

/// Version digits immediately following `token`, e.g. `"120.0.6099"`.
fn version_after(ua: &str, token: &str) -> Option<String> {
    let start = ua.find(token)? + token.len();
    let version: String = ua[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let version = version.trim_end_matches('.');
    (!version.is_empty()).then(|| version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(ua: &str) -> ParsedUserAgent {
        BuiltinUserAgentParser.parse(ua)
    }

    #[test]
    fn test_chrome_on_windows() {
        let p = parse(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.6099.130 Safari/537.36",
        );
        assert_eq!(p.browser, "Chrome");
        assert_eq!(p.version, "120.0.6099.130");
        assert_eq!(p.os, "Windows");
        assert_eq!(p.platform, "desktop");
    }

    #[test]
    fn test_edge_wins_over_chrome() {
        let p = parse(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91",
        );
        assert_eq!(p.browser, "Edge");
        assert_eq!(p.version, "120.0.2210.91");
    }

    #[test]
    fn test_safari_on_iphone() {
        let p = parse(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
        );
        assert_eq!(p.browser, "Safari");
        assert_eq!(p.version, "17.2");
        assert_eq!(p.os, "iOS");
        assert_eq!(p.platform, "mobile");
    }

    #[test]
    fn test_firefox_on_linux() {
        let p = parse("Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0");
        assert_eq!(p.browser, "Firefox");
        assert_eq!(p.version, "121.0");
        assert_eq!(p.os, "Linux");
        assert_eq!(p.platform, "desktop");
    }

    #[test]
    fn test_android_tablet() {
        let p = parse(
            "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        );
        assert_eq!(p.os, "Android");
        assert_eq!(p.platform, "tablet");
    }

    #[test]
    fn test_googlebot() {
        let p = parse("Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)");
        assert_eq!(p.browser, "Googlebot");
        assert_eq!(p.version, "2.1");
        assert_eq!(p.platform, "bot");
    }

    #[test]
    fn test_device_model_containing_bot_is_not_a_crawler() {
        let p = parse(
            "Mozilla/5.0 (Linux; Android 10; CUBOT_X30 Build/QP1A.190711.020) \
             AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
        );
        assert_eq!(p.browser, "Chrome");
        assert_eq!(p.os, "Android");
        assert_eq!(p.platform, "mobile");
    }

    #[test]
    fn test_unlisted_crawlers() {
        let ahrefs = parse("Mozilla/5.0 (compatible; AhrefsBot/7.0; +http://ahrefs.com/robot/)");
        assert_eq!(ahrefs.browser, "Bot");
        assert_eq!(ahrefs.platform, "bot");

        let bare = parse("Mozilla/5.0 (compatible; spider; +http://example.net)");
        assert_eq!(bare.platform, "bot");
    }

    #[test]
    fn test_curl() {
        let p = parse("curl/8.4.0");
        assert_eq!(p.browser, "curl");
        assert_eq!(p.version, "8.4.0");
        assert_eq!(p.os, "unknown");
        assert_eq!(p.platform, "unknown");
    }

    #[test]
    fn test_internet_explorer_11() {
        let p = parse("Mozilla/5.0 (Windows NT 6.1; Trident/7.0; rv:11.0) like Gecko");
        assert_eq!(p.browser, "Internet Explorer");
        assert_eq!(p.version, "11.0");
    }

    #[test]
    fn test_unknown_and_empty_are_defaults() {
        assert_eq!(parse(""), ParsedUserAgent::default());
        assert_eq!(parse("unknown"), ParsedUserAgent::default());
        let p = parse("SomethingElse");
        assert_eq!(p, ParsedUserAgent::default());
    }
}
