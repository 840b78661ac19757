//! Device hierarchy viewer model.
//!
//! The tree is built once from a root device by a pure recursive walk into
//! an immutable [`DeviceNode`] structure; renderers only walk the result.

use std::sync::Arc;

use serde::Serialize;

use crate::devices::{Device, Kind};

/// One row of the hierarchy: a device or signal and its components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceNode {
    /// Device name
    pub name: String,
    /// Participation kind
    pub kind: Kind,
    /// Expanded components in declaration order
    pub children: Vec<DeviceNode>,
}

impl DeviceNode {
    /// Build the subtree rooted at `device`.
    ///
    /// Component names that do not resolve are skipped.
    pub fn build(device: &dyn Device) -> Self {
        let children = device
            .component_names()
            .iter()
            .filter_map(|attr| device.component(attr))
            .map(|component| DeviceNode::build(component.as_ref()))
            .collect();

        Self {
            name: device.name().to_string(),
            kind: device.kind(),
            children,
        }
    }

    /// Whether the node has children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including itself.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(DeviceNode::len).sum::<usize>()
    }

    /// Depth-first visit, passing each node and its depth.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DeviceNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a DeviceNode, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}

/// Viewer state: the currently displayed device and its tree.
#[derive(Debug, Default)]
pub struct DeviceTreeView {
    object: Option<Arc<dyn Device>>,
    root: Option<DeviceNode>,
}

impl DeviceTreeView {
    /// Build a view for `object`.
    pub fn new(object: Arc<dyn Device>) -> Self {
        let mut view = Self::default();
        view.set_object(object);
        view
    }

    /// Replace the displayed device. The previous tree is discarded and
    /// rebuilt from scratch.
    pub fn set_object(&mut self, object: Arc<dyn Device>) {
        self.root = Some(DeviceNode::build(object.as_ref()));
        self.object = Some(object);
    }

    /// Rebuild from the current device, picking up hierarchy changes.
    pub fn refresh(&mut self) {
        if let Some(object) = self.object.clone() {
            self.set_object(object);
        }
    }

    /// Displayed device.
    #[must_use]
    pub fn object(&self) -> Option<&Arc<dyn Device>> {
        self.object.as_ref()
    }

    /// Root of the displayed tree.
    #[must_use]
    pub fn root(&self) -> Option<&DeviceNode> {
        self.root.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimDevice;

    fn stage() -> SimDevice {
        SimDevice::signal("stage", Kind::Normal)
            .with_component(
                "x",
                SimDevice::signal("stage_x", Kind::Hinted)
                    .with_component("user_setpoint", SimDevice::signal("stage_x_setpoint", Kind::Normal))
                    .with_component("velocity", SimDevice::signal("stage_x_velocity", Kind::Config)),
            )
            .with_component("y", SimDevice::signal("stage_y", Kind::Hinted))
    }

    #[test]
    fn test_build_recurses_components() {
        let tree = DeviceNode::build(&stage());
        assert_eq!(tree.name, "stage");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].name, "stage_x");
        assert_eq!(tree.children[0].children[1].kind, Kind::Config);
        assert!(tree.children[1].is_leaf());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_walk_reports_depth() {
        let tree = DeviceNode::build(&stage());
        let mut rows = Vec::new();
        tree.walk(&mut |node, depth| rows.push((node.name.as_str(), depth)));
        assert_eq!(
            rows,
            vec![
                ("stage", 0),
                ("stage_x", 1),
                ("stage_x_setpoint", 2),
                ("stage_x_velocity", 2),
                ("stage_y", 1),
            ]
        );
    }

    #[test]
    fn test_set_object_rebuilds() {
        let mut view = DeviceTreeView::new(Arc::new(stage()));
        assert_eq!(view.root().map(DeviceNode::len), Some(5));

        view.set_object(Arc::new(SimDevice::signal("I0", Kind::Hinted)));
        let root = view.root().unwrap();
        assert_eq!(root.name, "I0");
        assert!(root.is_leaf());
    }
}
