use url::Url;

/// Parse `--url`: an absolute http(s) URL with a host.
///
/// # Errors
///
/// Returns an error message if the URL does not parse or cannot be served
/// by the build server.
pub fn parse_entry_url(s: &str) -> Result<Url, String> {
    let url = Url::parse(s).map_err(|e| format!("Invalid URL '{}': {}", s, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("Only http and https URLs are supported: '{}'", s));
    }
    if url.host_str().is_none() {
        return Err(format!("URL has no host: '{}'", s));
    }

    Ok(url)
}

/// Parse `--urlpattern`, which must contain the `{appname}` placeholder.
///
/// # Errors
///
/// Returns an error message if the placeholder is missing.
pub fn parse_url_pattern(s: &str) -> Result<String, String> {
    if !s.contains("{appname}") {
        return Err(format!(
            "URL pattern must contain the {{appname}} placeholder: '{}'",
            s
        ));
    }
    Ok(s.to_string())
}
