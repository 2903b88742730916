//! Public addressing for photos stored in a bucket.

use url::Url;

/// Host that serves publicly readable objects.
pub const PUBLIC_URL_BASE: &str = "https://storage.googleapis.com";

/// Build the public URL of `object` in `bucket`.
///
/// Each `/`-separated part of the object name is percent-encoded, so names
/// containing `#`, `%` or spaces still resolve to the stored object. The URL
/// is only reachable once the object has been made publicly readable;
/// writing the object alone is not enough.
pub fn public_url(bucket: &str, object: &str) -> String {
    let mut url = Url::parse(PUBLIC_URL_BASE).expect("PUBLIC_URL_BASE is a valid URL");
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(bucket).extend(object.split('/'));
    }
    url.into()
}
