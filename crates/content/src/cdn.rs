/// Rewrites resource URLs served from legacy hosts onto the CDN.
#[derive(Debug, Clone, Default)]
pub struct CdnRewriter {
    cdn_url: Option<String>,
    legacy_hosts: Vec<String>,
}

impl CdnRewriter {
    pub fn new(cdn_url: Option<String>, legacy_hosts: Vec<String>) -> Self {
        let cdn_url = cdn_url
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        // A host that is also the CDN host would make rewriting non-idempotent
        let cdn_host = cdn_url
            .as_deref()
            .and_then(split_origin)
            .map(|(host, _)| host.to_ascii_lowercase());

        let legacy_hosts = legacy_hosts
            .into_iter()
            .map(|host| host.trim().trim_end_matches('/').to_ascii_lowercase())
            .filter(|host| !host.is_empty() && Some(host) != cdn_host.as_ref())
            .collect();

        Self {
            cdn_url,
            legacy_hosts,
        }
    }

    /// A rewriter that returns every URL unchanged
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.cdn_url.is_some() && !self.legacy_hosts.is_empty()
    }

    /// Map `url` onto the CDN if it points at one of the legacy hosts.
    ///
    /// Path, query and fragment are preserved. Anything else, including
    /// relative URLs and URLs already on the CDN, is returned as-is.
    pub fn rewrite_url(&self, url: &str) -> String {
        let cdn_url = match &self.cdn_url {
            Some(cdn_url) => cdn_url,
            None => return url.to_string(),
        };

        match split_origin(url) {
            Some((host, rest)) if self.is_legacy_host(host) => format!("{}{}", cdn_url, rest),
            _ => url.to_string(),
        }
    }

    fn is_legacy_host(&self, host: &str) -> bool {
        self.legacy_hosts
            .iter()
            .any(|legacy| legacy.eq_ignore_ascii_case(host))
    }
}

/// Split an absolute or protocol-relative URL into `(host, rest)`.
fn split_origin(url: &str) -> Option<(&str, &str)> {
    let url = url.trim();
    let after_scheme = ["https://", "http://", "//"].iter().find_map(|prefix| {
        let head = url.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| &url[prefix.len()..])
    })?;

    let host_end = after_scheme
        .find(|c: char| c == '/' || c == '?' || c == '#')
        .unwrap_or(after_scheme.len());

    let (host, rest) = after_scheme.split_at(host_end);
    if host.is_empty() {
        return None;
    }

    Some((host, rest))
}
