/// Top-level pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Crawler,
    Relevance,
    Results,
    NotFound,
}

/// Pages listed in the navigation sidebar, in display order.
pub const NAV_PAGES: [Page; 4] = [Page::Home, Page::Crawler, Page::Relevance, Page::Results];

impl Page {
    /// Resolves a route path. Unknown paths map to [`Page::NotFound`].
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalized {
            "" | "/" => Page::Home,
            "/crawler" => Page::Crawler,
            "/relevance" => Page::Relevance,
            "/results" => Page::Results,
            _ => Page::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Crawler => "/crawler",
            Page::Relevance => "/relevance",
            Page::Results => "/results",
            Page::NotFound => "/404",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Crawler => "News crawl",
            Page::Relevance => "Relevance evaluation",
            Page::Results => "Results",
            Page::NotFound => "Page not found",
        }
    }

    /// Whether opening this page loads the backend file list.
    pub(crate) fn loads_files(self) -> bool {
        matches!(self, Page::Relevance | Page::Results)
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path(""), Page::Home);
        assert_eq!(Page::from_path("/crawler"), Page::Crawler);
        assert_eq!(Page::from_path("/relevance/"), Page::Relevance);
        assert_eq!(Page::from_path(" /results "), Page::Results);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Page::from_path("/settings"), Page::NotFound);
        assert_eq!(Page::from_path("/Crawler"), Page::NotFound);
    }

    #[test]
    fn paths_round_trip_for_nav_pages() {
        for page in super::NAV_PAGES {
            assert_eq!(Page::from_path(page.path()), page);
        }
    }
}
