//! Contact-link composition.
//!
//! Contacting a listing owner is not a service call: the API composes a
//! `mailto:` URL and the client's user agent takes it from there.

/// Compose the `mailto:` URL for inquiring about a listing.
///
/// Subject and body follow the fixed inquiry template; both are
/// percent-encoded so the URL survives query-string parsing in mail
/// clients.
pub fn inquiry_mailto(owner_email: &str, owner_name: &str, listing_title: &str) -> String {
    let subject = format!("Inquiry about: {listing_title}");
    let body = format!(
        "Hi {owner_name},\n\nI'm interested in your book \"{listing_title}\" listed on \
         BookSwap.\n\nPlease let me know if it's still available.\n\nThanks!"
    );
    format!(
        "mailto:{}?subject={}&body={}",
        owner_email,
        encode_component(&subject),
        encode_component(&body)
    )
}

/// Percent-encode a `mailto:` header value.
///
/// Keeps RFC 3986 unreserved characters (`A-Z a-z 0-9 - _ . ~`) and encodes
/// everything else byte-wise, including spaces (as `%20`, not `+`).
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            other => {
                out.push_str(&format!("%{other:02X}"));
            }
        }
    }
    out
}
