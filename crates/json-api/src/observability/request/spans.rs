//! Route labels for spans and metrics.

use uuid::Uuid;

/// Path segments after these collections are caller-chosen codes.
const CODE_COLLECTIONS: [&str; 2] = ["coupons", "affiliates"];

/// Replace identifiers in `path` with placeholders so labels stay bounded.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous: Option<&str> = None;

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if previous.is_some_and(|collection| CODE_COLLECTIONS.contains(&collection)) {
            normalised.push_str("{code}");
        } else {
            normalised.push_str(segment);
        }

        previous = Some(segment);
    }

    normalised
}
