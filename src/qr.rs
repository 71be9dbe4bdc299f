//! QR image URL templating.
//!
//! The renderer is an opaque external service that turns a `data` query
//! parameter into a scannable image. Used on the embedded screen so
//! visitors can open sign-up links on their own phones.

/// Builds the image URL for a scannable QR code of `link`.
///
/// Falls back to the bare base URL if it does not parse; the kiosk then
/// simply shows a broken image instead of crashing the session.
pub fn qr_image_url(base: &str, link: &str) -> String {
    match reqwest::Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("data", link);
            url.into()
        }
        Err(err) => {
            tracing::warn!(base, %err, "Invalid QR base URL");
            base.to_string()
        }
    }
}
