//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode a slug for use as one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Route of a post page
///
/// # Examples
/// ```ignore
/// post_path("hello-world") // -> "/posts/hello-world"
/// ```
pub fn post_path(slug: &str) -> String {
    format!("/posts/{}", encode_segment(slug))
}

/// Route of a category listing
pub fn category_path(category: &str) -> String {
    format!("/category/{}", encode_segment(category))
}

/// Route of a subcategory listing
pub fn subcategory_path(category: &str, subcategory: &str) -> String {
    format!(
        "/category/{}/{}",
        encode_segment(category),
        encode_segment(subcategory)
    )
}

/// Image URL with delivery transformations appended, or the fallback image
///
/// # Examples
/// ```ignore
/// image_url(Some("https://cdn/x.jpg"), Some("f_auto,q_auto,w_800"), FALLBACK)
/// // -> "https://cdn/x.jpg?f_auto,q_auto,w_800"
/// ```
pub fn image_url(image: Option<&str>, transform: Option<&str>, fallback: &str) -> String {
    match image.map(str::trim).filter(|i| !i.is_empty()) {
        Some(image) => match transform {
            Some(transform) => format!("{}?{}", image, transform),
            None => image.to_string(),
        },
        None => fallback.to_string(),
    }
}

/// Human title from a slug ("business-and-economy" -> "business and economy")
pub fn title_from_slug(slug: &str) -> String {
    slug.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(post_path("hello-world"), "/posts/hello-world");
        assert_eq!(category_path("news"), "/category/news");
        assert_eq!(subcategory_path("news", "local"), "/category/news/local");
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(post_path("a b/c?d"), "/posts/a%20b%2Fc%3Fd");
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url(Some("https://cdn/x.jpg"), Some("f_auto,q_auto,w_800"), "fb"),
            "https://cdn/x.jpg?f_auto,q_auto,w_800"
        );
        assert_eq!(image_url(Some("https://cdn/x.jpg"), None, "fb"), "https://cdn/x.jpg");
        assert_eq!(image_url(None, Some("w_800"), "fb"), "fb");
        assert_eq!(image_url(Some(""), None, "fb"), "fb");
    }

    #[test]
    fn test_title_from_slug() {
        assert_eq!(title_from_slug("business-and-economy"), "business and economy");
    }
}
