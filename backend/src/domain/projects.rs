//! Project showcase catalogue.
//!
//! The portfolio pages render entries from a catalogue compiled into the
//! binary. The catalogue doubles as the allow-list for `/project/{id}`:
//! detail pages resolve through a lookup, so request input is never turned
//! into a template or file path.

use std::fmt;

/// Identifier slug for a showcase entry.
///
/// Slugs are lowercase ASCII letters, digits, and hyphens. Anything else is
/// rejected before the catalogue is even consulted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectSlug(String);

impl ProjectSlug {
    /// Validate and construct a [`ProjectSlug`] from request input.
    pub fn parse(slug: impl AsRef<str>) -> Option<Self> {
        let slug = slug.as_ref();
        let well_formed = !slug.is_empty()
            && slug.len() <= 64
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        well_formed.then(|| Self(slug.to_owned()))
    }
}

impl AsRef<str> for ProjectSlug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// One showcase entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Slug used in `/project/{slug}` URLs.
    pub slug: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-line summary shown on the index page.
    pub summary: &'static str,
    /// Image path under `/static`.
    pub image: &'static str,
    /// Detail page paragraphs.
    pub body: &'static [&'static str],
}

/// The compiled-in showcase entries, in display order.
const PROJECTS: &[Project] = &[
    Project {
        slug: "write-up",
        title: "CTF write-ups",
        summary: "Notes and solutions from capture-the-flag events.",
        image: "images/write-up.png",
        body: &[
            "A running collection of challenge write-ups, mostly web and \
             forensics, kept short enough to re-read before the next event.",
            "Each entry records the intended path and the one actually taken.",
        ],
    },
    Project {
        slug: "board",
        title: "Community board",
        summary: "The discussion board and Q&A features hosted on this site.",
        image: "images/board.png",
        body: &[
            "Registered visitors can post to the board; anyone can leave a \
             question on the Q&A page and check back for an answer.",
        ],
    },
    Project {
        slug: "homelab",
        title: "Homelab",
        summary: "Self-hosted services and the automation holding them together.",
        image: "images/homelab.png",
        body: &[
            "A small cluster of second-hand machines running this site and a \
             handful of internal tools.",
            "Provisioning is scripted end to end so a dead disk costs an \
             evening, not a weekend.",
        ],
    },
];

/// Read-only lookup over the compiled-in showcase entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectCatalogue;

impl ProjectCatalogue {
    /// All entries in display order.
    pub fn all(&self) -> &'static [Project] {
        PROJECTS
    }

    /// Resolve a slug against the allow-list.
    pub fn find(&self, slug: &ProjectSlug) -> Option<&'static Project> {
        PROJECTS.iter().find(|p| p.slug == slug.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("write-up", true)]
    #[case("WRITE-UP", false)]
    #[case("../secret", false)]
    #[case("a/b", false)]
    #[case("", false)]
    #[case("ok-slug-42", true)]
    fn slug_parsing(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(ProjectSlug::parse(input).is_some(), ok, "input: {input:?}");
    }

    #[rstest]
    fn catalogue_resolves_known_slug() {
        let slug = ProjectSlug::parse("write-up").expect("valid slug");
        let project = ProjectCatalogue.find(&slug).expect("known entry");
        assert_eq!(project.title, "CTF write-ups");
    }

    #[rstest]
    fn catalogue_rejects_unknown_slug() {
        let slug = ProjectSlug::parse("unknown-entry").expect("valid slug");
        assert!(ProjectCatalogue.find(&slug).is_none());
    }

    #[rstest]
    fn slugs_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for project in ProjectCatalogue.all() {
            assert!(seen.insert(project.slug), "duplicate slug {}", project.slug);
        }
    }
}
