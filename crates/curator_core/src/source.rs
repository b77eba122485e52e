use url::Url;

/// Derives a short source label from an article URL.
///
/// `https://www.example.co.uk/x` yields `example`. Hosts with a single label
/// are returned whole. Anything that does not parse as a URL yields an empty
/// string.
pub fn extract_source(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Could not derive source from {:?}: {}", url, e);
            return String::new();
        }
    };

    let host = parsed.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() >= 2 {
        return labels[0].to_string();
    }
    host.to_string()
}
