//! Page navigation for the three-page UI.

/// Page currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Home,
    /// Upload a photo and show the reference gallery for its grade.
    Classify,
    /// Upload a photo and show the detailed prediction.
    Predict,
}

/// User actions that move between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    OpenClassify,
    OpenPredict,
    Back,
}

impl Page {
    /// Page reached from `self` after `action`.
    pub fn next(self, action: NavAction) -> Page {
        match action {
            NavAction::OpenClassify => Page::Classify,
            NavAction::OpenPredict => Page::Predict,
            NavAction::Back => Page::Home,
        }
    }
}

/// Holds the current page; starts at [`Page::Home`].
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    page: Page,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Apply `action`; returns true when the page changed.
    pub fn apply(&mut self, action: NavAction) -> bool {
        let next = self.page.next(action);
        if next == self.page {
            return false;
        }
        tracing::debug!("navigate {:?} -> {:?}", self.page, next);
        self.page = next;
        true
    }
}
