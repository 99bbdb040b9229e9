//! Target URL construction.

use crate::protocol::{CallSpec, encode_uri_component, js_string};

/// Append the call's params to its URL.
///
/// Names are appended as given, values are stringified and percent-encoded. The first
/// pair is introduced with `?` even when the URL already carries a query.
pub fn build_target_url(spec: &CallSpec) -> String {
    let mut url = spec.url.clone();
    let mut joiner = '?';

    for (name, value) in &spec.params {
        url.push(joiner);
        url.push_str(name);
        url.push('=');
        url.push_str(&encode_uri_component(&js_string(value)));
        joiner = '&';
    }

    url
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_no_params_keeps_url() {
        let spec = CallSpec::new("GET", "http://127.0.0.1:1234/v1/version");
        assert_eq!(build_target_url(&spec), "http://127.0.0.1:1234/v1/version");
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let spec = CallSpec::new("GET", "http://127.0.0.1:1234/v1/commands/network get")
            .with_param("title", "My Network")
            .with_param("count", 3)
            .with_param("flag", json!(true));

        assert_eq!(
            build_target_url(&spec),
            "http://127.0.0.1:1234/v1/commands/network get?title=My%20Network&count=3&flag=true"
        );
    }
}
