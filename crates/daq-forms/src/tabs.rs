//! Named scan panels shown as tabs.

use tracing::debug;

use crate::panel::ScanPanel;

/// A tab: a title and the panel it shows.
pub struct ScanTab<P> {
    /// Tab title
    pub title: String,
    /// Panel behind the tab
    pub panel: Box<dyn ScanPanel<P>>,
}

/// Collection of scan panels with one visible tab.
pub struct ScanTabs<P> {
    tabs: Vec<ScanTab<P>>,
    current: usize,
}

impl<P> Default for ScanTabs<P> {
    fn default() -> Self {
        Self {
            tabs: Vec::new(),
            current: 0,
        }
    }
}

impl<P> ScanTabs<P> {
    /// Create an empty tab set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab. The first tab added becomes visible.
    pub fn add_tab(&mut self, title: impl Into<String>, panel: impl ScanPanel<P> + 'static) {
        self.tabs.push(ScanTab {
            title: title.into(),
            panel: Box::new(panel),
        });
    }

    /// Builder-style [`ScanTabs::add_tab`].
    #[must_use]
    pub fn with_tab(mut self, title: impl Into<String>, panel: impl ScanPanel<P> + 'static) -> Self {
        self.add_tab(title, panel);
        self
    }

    /// Show tab `index`. Out-of-range indices are ignored.
    pub fn set_current(&mut self, index: usize) {
        if let Some(tab) = self.tabs.get(index) {
            debug!(tab = %tab.title, "tab selected");
            self.current = index;
        }
    }

    /// Index of the visible tab.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Visible tab.
    #[must_use]
    pub fn current(&self) -> Option<&ScanTab<P>> {
        self.tabs.get(self.current)
    }

    /// Visible tab, mutably.
    pub fn current_mut(&mut self) -> Option<&mut ScanTab<P>> {
        self.tabs.get_mut(self.current)
    }

    /// Tab titles in order.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.title.as_str()).collect()
    }

    /// Number of tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether no tabs were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Build the plan of the visible tab.
    #[must_use]
    pub fn current_plan(&self) -> Option<P> {
        self.current()?.panel.build_plan()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::devices::{DetectorRef, MoverRef};
    use crate::panel::{AxisScanPanel, CountScanPanel};
    use crate::plans::{count, scan};
    use crate::sim::{SimDetector, SimMover};

    fn tabs() -> ScanTabs<crate::plans::PlanInvocation> {
        let dets = vec![Arc::new(SimDetector::new("I0")) as DetectorRef];
        ScanTabs::new()
            .with_tab(
                "Scan",
                AxisScanPanel::new(scan, [Arc::new(SimMover::new("M")) as MoverRef], dets.clone()),
            )
            .with_tab("Count", CountScanPanel::new(count, dets))
    }

    #[test]
    fn test_current_plan_follows_visible_tab() {
        let mut tabs = tabs();
        assert_eq!(tabs.titles(), vec!["Scan", "Count"]);
        assert_eq!(tabs.current_plan().unwrap().plan_type(), "scan");

        tabs.set_current(1);
        assert_eq!(tabs.current_plan().unwrap().plan_type(), "count");
    }

    #[test]
    fn test_out_of_range_tab_ignored() {
        let mut tabs = tabs();
        tabs.set_current(1);
        tabs.set_current(9);
        assert_eq!(tabs.current_index(), 1);
    }

    #[test]
    fn test_empty_tabs_have_no_plan() {
        let tabs: ScanTabs<crate::plans::PlanInvocation> = ScanTabs::new();
        assert!(tabs.current_plan().is_none());
    }
}
