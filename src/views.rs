//! The view router: one page is active at a time, selected by its route.

/// The five admin views. Assign additionally needs a selected issue id, carried
/// in its route; without one the page renders nothing (redirects back to the
/// issues list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Issues,
    Resolved,
    Assign,
    AddIssue,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Issues => "Reported Issues",
            Page::Resolved => "Resolved Issues",
            Page::Assign => "Assign Employee",
            Page::AddIssue => "Add New Issue",
        }
    }

    /// The sidebar entry this page highlights. The assign and add-issue forms
    /// are reached from the issues list and keep it highlighted.
    fn nav_anchor(&self) -> Page {
        match self {
            Page::Assign | Page::AddIssue => Page::Issues,
            other => *other,
        }
    }
}

pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Sidebar entries with exactly one marked active.
pub fn nav_items(current: Page) -> Vec<NavItem> {
    let anchor = current.nav_anchor();
    [
        (Page::Dashboard, "/dashboard"),
        (Page::Issues, "/issues"),
        (Page::Resolved, "/resolved"),
    ]
    .into_iter()
    .map(|(page, href)| NavItem {
        label: page.title(),
        href,
        active: page == anchor,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_nav_entry_is_active() {
        for page in [
            Page::Dashboard,
            Page::Issues,
            Page::Resolved,
            Page::Assign,
            Page::AddIssue,
        ] {
            let active = nav_items(page).iter().filter(|n| n.active).count();
            assert_eq!(active, 1, "{page:?} should highlight exactly one entry");
        }
    }

    #[test]
    fn form_pages_highlight_the_issues_entry() {
        for page in [Page::Assign, Page::AddIssue] {
            let items = nav_items(page);
            let active = items.iter().find(|n| n.active).unwrap();
            assert_eq!(active.href, "/issues");
        }
    }
}
