//! Call validation.
//!
//! Only what is needed to issue the call is checked; payloads are forwarded untouched.

use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{Map, Value};
use url::Url;

use crate::{
    error::{RelayError, Result},
    protocol::{CallSpec, Command, js_string},
};

/// Validate a call and classify its command
pub fn validate_call_spec(spec: &CallSpec,) -> Result<Command,> {
    let command = spec.command_kind()?;

    match command {
        Command::Version => {}
        Command::WebBrowser => validate_url(&spec.url,)?,
        Command::Http(_,) => {
            validate_url(&spec.url,)?;
            validate_headers(&spec.headers,)?;
        }
    }

    Ok(command,)
}

/// Validate that the URL is absolute
fn validate_url(url: &str,) -> Result<(),> {
    if url.is_empty() {
        return Err(RelayError::invalid_call("missing url",),);
    }

    Url::parse(url,)?;
    Ok((),)
}

/// Validate that every header can be put on the wire
fn validate_headers(headers: &Map<String, Value,>,) -> Result<(),> {
    for (name, value,) in headers {
        if HeaderName::from_bytes(name.as_bytes(),).is_err() {
            return Err(RelayError::invalid_call(format!("invalid header name {name:?}"),),);
        }
        if HeaderValue::from_str(&js_string(value,),).is_err() {
            return Err(RelayError::invalid_call(format!("invalid value for header {name}"),),);
        }
    }

    Ok((),)
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;

    #[test]
    fn test_version_needs_no_url() {
        assert_eq!(validate_call_spec(&CallSpec::new("version", ""),).unwrap(), Command::Version);
    }

    #[test]
    fn test_http_call_needs_absolute_url() {
        assert!(validate_call_spec(&CallSpec::new("GET", ""),).is_err());
        assert!(validate_call_spec(&CallSpec::new("GET", "/v1/networks"),).is_err());
        assert_eq!(
            validate_call_spec(&CallSpec::new("GET", "http://127.0.0.1:1234/v1"),).unwrap(),
            Command::Http(Method::GET)
        );
    }

    #[test]
    fn test_webbrowser_needs_url() {
        assert!(validate_call_spec(&CallSpec::new("webbrowser", ""),).is_err());
        assert!(validate_call_spec(&CallSpec::new("webbrowser", "https://example.test"),).is_ok());
    }

    #[test]
    fn test_http_call_needs_valid_headers() {
        let url = "http://127.0.0.1:1234/v1";

        assert!(validate_call_spec(&CallSpec::new("GET", url).with_header("bad name", "x"),).is_err());
        assert!(validate_call_spec(&CallSpec::new("GET", url).with_header("Accept", "a\nb"),).is_err());
        assert!(validate_call_spec(&CallSpec::new("GET", url).with_header("Accept", 1),).is_ok());
    }
}
