//! A minimal serializable element tree handed to the shell.
//!
//! The shell mirrors [`Mount`] into the real document. Click dispatch is
//! modelled here so propagation rules can be checked without a browser.

use serde::{Deserialize, Serialize};

use crate::event::Action;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_click: Option<Action>,
    #[serde(default)]
    pub stop_propagation: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl Node {
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Adds whitespace-separated class names.
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    #[must_use]
    pub fn stop_propagation(mut self) -> Self {
        self.stop_propagation = true;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search by key.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Node> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }

    /// Child-index path from `self` to the node with `key`.
    #[must_use]
    pub fn path_to(&self, key: &str) -> Option<Vec<usize>> {
        if self.key.as_deref() == Some(key) {
            return Some(Vec::new());
        }
        self.children.iter().enumerate().find_map(|(i, child)| {
            child.path_to(key).map(|mut rest| {
                rest.insert(0, i);
                rest
            })
        })
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Actions fired by a click on the node at `path`, in bubbling order.
    ///
    /// A disabled target fires nothing. Bubbling stops after the first node
    /// that contains propagation.
    #[must_use]
    pub fn dispatch_click(&self, path: &[usize]) -> Vec<Action> {
        let mut chain = vec![self];
        let mut current = self;
        for &index in path {
            match current.children.get(index) {
                Some(child) => {
                    chain.push(child);
                    current = child;
                }
                None => return Vec::new(),
            }
        }

        if current.disabled {
            return Vec::new();
        }

        let mut fired = Vec::new();
        for node in chain.iter().rev() {
            if let Some(action) = &node.on_click {
                fired.push(action.clone());
            }
            if node.stop_propagation {
                break;
            }
        }
        fired
    }
}

/// The container the feed renders into. Every render replaces all children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mount {
    pub id: String,
    pub children: Vec<Node>,
}

impl Mount {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Node> {
        self.children.iter().find_map(|child| child.find(key))
    }

    /// Clicks the node with `key`, returning the fired actions.
    #[must_use]
    pub fn click(&self, key: &str) -> Vec<Action> {
        self.children
            .iter()
            .find_map(|root| root.path_to(key).map(|path| root.dispatch_click(&path)))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ride::RideId;

    fn card() -> Node {
        Node::element("div")
            .key("card")
            .on_click(Action::SelectRide { id: RideId::from(1) })
            .child(Node::element("span").key("label").text("Jaro"))
            .child(
                Node::element("button")
                    .key("offer")
                    .text("Offer Ride")
                    .on_click(Action::OfferRide { id: RideId::from(1) })
                    .stop_propagation(),
            )
    }

    #[test]
    fn test_click_bubbles_to_card() {
        let actions = card().dispatch_click(&[0]);
        assert_eq!(actions, vec![Action::SelectRide { id: RideId::from(1) }]);
    }

    #[test]
    fn test_stop_propagation_contains_click() {
        let actions = card().dispatch_click(&[1]);
        assert_eq!(actions, vec![Action::OfferRide { id: RideId::from(1) }]);
    }

    #[test]
    fn test_disabled_target_fires_nothing() {
        let mut node = card();
        node.children[1].disabled = true;
        assert!(node.dispatch_click(&[1]).is_empty());
    }

    #[test]
    fn test_bad_path_fires_nothing() {
        assert!(card().dispatch_click(&[7]).is_empty());
    }

    #[test]
    fn test_find_and_path() {
        let node = card();
        assert_eq!(node.path_to("offer"), Some(vec![1]));
        assert_eq!(node.path_to("card"), Some(vec![]));
        assert!(node.path_to("missing").is_none());
        assert_eq!(node.find("label").unwrap().text.as_deref(), Some("Jaro"));
        assert_eq!(node.text_content(), "Jaro Offer Ride");
    }

    #[test]
    fn test_class_builder_splits() {
        let node = Node::element("p").class("text-gray-500  p-4");
        assert_eq!(node.classes, ["text-gray-500", "p-4"]);
        assert!(node.has_class("p-4"));
    }

    #[test]
    fn test_mount_replaces_children() {
        let mut mount = Mount::new("ride-list");
        mount.replace_children(vec![card(), card()]);
        assert_eq!(mount.children.len(), 2);

        mount.replace_children(vec![Node::element("p").text("Loading rides...")]);
        assert_eq!(mount.children.len(), 1);
        assert!(mount.find("card").is_none());
    }

    #[test]
    fn test_mount_click_by_key() {
        let mut mount = Mount::new("ride-list");
        mount.replace_children(vec![card()]);
        assert_eq!(
            mount.click("offer"),
            vec![Action::OfferRide { id: RideId::from(1) }]
        );
        assert!(mount.click("nothing").is_empty());
    }
}
