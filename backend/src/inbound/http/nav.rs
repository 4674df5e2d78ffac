//! Redirect helpers shared by the HTML handlers.

use actix_web::http::header;
use actix_web::HttpResponse;

/// `303 See Other` redirect; used after every successful form POST so a
/// refresh re-issues a GET instead of resubmitting.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Redirect an anonymous request to the login form, preserving the
/// originally requested path for the post-login redirect.
pub fn login_redirect(next: &str) -> HttpResponse {
    let target = format!("/login?next={}", urlencoding::encode(next));
    see_other(&target)
}

/// Validate a client-supplied post-login target.
///
/// Only internal absolute paths are honoured: a leading `/`, not `//`
/// (scheme-relative), and no backslash tricks. Anything else falls back to
/// the home page.
pub fn safe_next(raw: Option<&str>) -> Option<&str> {
    let next = raw?;
    let internal = next.starts_with('/')
        && !next.starts_with("//")
        && !next.starts_with("/\\")
        && !next.contains("://");
    internal.then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use rstest::rstest;

    #[rstest]
    #[case(Some("/board"), Some("/board"))]
    #[case(Some("/qa?page=2"), Some("/qa?page=2"))]
    #[case(Some("//evil.example"), None)]
    #[case(Some("/\\evil.example"), None)]
    #[case(Some("https://evil.example"), None)]
    #[case(Some("board"), None)]
    #[case(None, None)]
    fn next_targets_are_filtered(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(safe_next(raw), expected);
    }

    #[rstest]
    fn login_redirect_encodes_the_target() {
        let response = login_redirect("/board?page=2");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(actix_web::http::header::LOCATION)
            .expect("location header")
            .to_str()
            .expect("ascii header");
        assert_eq!(location, "/login?next=%2Fboard%3Fpage%3D2");
    }
}
