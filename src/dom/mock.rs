//! In-memory document used by the widget tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Document, DomEvent, EventKind, Handler, ListenTarget};
use crate::error::ZoomError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MockElement(usize);

#[derive(Default)]
struct NodeData {
    tag: String,
    parent: Option<MockElement>,
    children: Vec<MockElement>,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    text: Option<String>,
    background: Option<String>,
}

struct Registered {
    target: ListenTarget<MockElement>,
    kind: EventKind,
    handler: Rc<RefCell<Handler<MockElement>>>,
}

pub struct MockDocument {
    nodes: RefCell<Vec<NodeData>>,
    listeners: RefCell<Vec<Option<Registered>>>,
    body: MockElement,
    reject_class_changes: Cell<bool>,
}

/// `tag`, `.class`, `tag.class` and `tag[attr]`, which is all the tests need.
struct SimpleSelector {
    tag: Option<String>,
    class: Option<String>,
    attr: Option<String>,
}

fn parse_selector(selector: &str) -> Result<SimpleSelector, ZoomError> {
    let invalid = || ZoomError::Dom(format!("SyntaxError: '{}' is not a valid selector", selector));
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(invalid());
    }

    let (head, attr) = match selector.find('[') {
        Some(open) => {
            let rest = &selector[open + 1..];
            let name = rest.strip_suffix(']').ok_or_else(invalid)?;
            if name.is_empty() || name.contains(['[', ']']) {
                return Err(invalid());
            }
            (&selector[..open], Some(name.to_string()))
        }
        None => (selector, None),
    };

    let (tag, class) = match head.split_once('.') {
        Some((tag, class)) => (tag, Some(class.to_string())),
        None => (head, None),
    };

    let valid = |s: &str| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid(tag) || class.as_deref().is_some_and(|c| c.is_empty() || !valid(c)) {
        return Err(invalid());
    }

    Ok(SimpleSelector {
        tag: (!tag.is_empty()).then(|| tag.to_string()),
        class,
        attr,
    })
}

impl MockDocument {
    pub fn new() -> Self {
        let body = NodeData {
            tag: "body".to_string(),
            ..Default::default()
        };
        Self {
            nodes: RefCell::new(vec![body]),
            listeners: RefCell::new(Vec::new()),
            body: MockElement(0),
            reject_class_changes: Cell::new(false),
        }
    }

    pub fn body_element(&self) -> MockElement {
        self.body
    }

    /// Appends an `<img>` to the body. `None` leaves the src attribute off.
    pub fn add_image(&self, src: Option<&str>) -> MockElement {
        let img = self.create_element("img").unwrap();
        if let Some(src) = src {
            self.set_attribute(&img, "src", src).unwrap();
        }
        self.append_child(&self.body, &img).unwrap();
        img
    }

    /// Makes every later class add/remove fail, as a detached or foreign
    /// node would.
    pub fn reject_class_changes(&self, reject: bool) {
        self.reject_class_changes.set(reject);
    }

    fn check_class_change(&self) -> Result<(), ZoomError> {
        if self.reject_class_changes.get() {
            return Err(ZoomError::Dom("classList is read-only".to_string()));
        }
        Ok(())
    }

    pub fn tag(&self, element: MockElement) -> String {
        self.nodes.borrow()[element.0].tag.clone()
    }

    pub fn text(&self, element: MockElement) -> Option<String> {
        self.nodes.borrow()[element.0].text.clone()
    }

    pub fn background(&self, element: MockElement) -> Option<String> {
        self.nodes.borrow()[element.0].background.clone()
    }

    pub fn parent(&self, element: MockElement) -> Option<MockElement> {
        self.nodes.borrow()[element.0].parent
    }

    pub fn children(&self, element: MockElement) -> Vec<MockElement> {
        self.nodes.borrow()[element.0].children.clone()
    }

    /// Elements attached under the body that carry `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<MockElement> {
        self.attached()
            .into_iter()
            .filter(|el| self.contains_class(el, class))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().iter().flatten().count()
    }

    pub fn listeners_on(&self, element: MockElement, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .flatten()
            .filter(|l| l.kind == kind && l.target == ListenTarget::Element(element))
            .count()
    }

    pub fn page_listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .flatten()
            .filter(|l| l.target == ListenTarget::Page)
            .count()
    }

    /// Clicks `element`; the event bubbles up through its ancestors.
    pub fn click(&self, element: MockElement) {
        let mut path = vec![element];
        let mut current = self.parent(element);
        while let Some(el) = current {
            path.push(el);
            current = self.parent(el);
        }

        let event = DomEvent::Click { target: Some(element) };
        for el in path {
            self.dispatch(&ListenTarget::Element(el), EventKind::Click, &event);
        }
    }

    pub fn press(&self, key: &str) {
        let event = DomEvent::Key { key: key.to_string() };
        self.dispatch(&ListenTarget::Page, EventKind::KeyDown, &event);
    }

    fn dispatch(&self, target: &ListenTarget<MockElement>, kind: EventKind, event: &DomEvent<MockElement>) {
        let ids: Vec<usize> = self
            .listeners
            .borrow()
            .iter()
            .enumerate()
            .filter_map(|(id, l)| l.as_ref().filter(|l| l.kind == kind && &l.target == target).map(|_| id))
            .collect();

        for id in ids {
            // A handler may have removed a later one.
            let handler = match self.listeners.borrow().get(id) {
                Some(Some(l)) => l.handler.clone(),
                _ => continue,
            };
            let mut callback = handler.borrow_mut();
            (*callback)(event.clone());
        }
    }

    fn attached(&self) -> Vec<MockElement> {
        let mut out = Vec::new();
        let mut stack = vec![self.body];
        while let Some(el) = stack.pop() {
            out.push(el);
            let children = self.children(el);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    fn matches(&self, element: MockElement, selector: &SimpleSelector) -> bool {
        let nodes = self.nodes.borrow();
        let node = &nodes[element.0];
        selector.tag.as_ref().map_or(true, |t| &node.tag == t)
            && selector.class.as_ref().map_or(true, |c| node.classes.contains(c))
            && selector.attr.as_ref().map_or(true, |a| node.attrs.contains_key(a))
    }
}

impl Document for MockDocument {
    type Element = MockElement;
    type Listener = usize;

    fn create_element(&self, tag: &str) -> Result<MockElement, ZoomError> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            tag: tag.to_string(),
            ..Default::default()
        });
        Ok(MockElement(nodes.len() - 1))
    }

    fn body(&self) -> Result<MockElement, ZoomError> {
        Ok(self.body)
    }

    fn append_child(&self, parent: &MockElement, child: &MockElement) -> Result<(), ZoomError> {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(old) = nodes[child.0].parent.take() {
            nodes[old.0].children.retain(|c| c != child);
        }
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
        Ok(())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<MockElement>, ZoomError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .attached()
            .into_iter()
            .filter(|el| *el != self.body && self.matches(*el, &selector))
            .collect())
    }

    fn attribute(&self, element: &MockElement, name: &str) -> Option<String> {
        self.nodes.borrow()[element.0].attrs.get(name).cloned()
    }

    fn set_attribute(&self, element: &MockElement, name: &str, value: &str) -> Result<(), ZoomError> {
        self.nodes.borrow_mut()[element.0]
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_text(&self, element: &MockElement, text: &str) {
        self.nodes.borrow_mut()[element.0].text = Some(text.to_string());
    }

    fn contains_class(&self, element: &MockElement, class: &str) -> bool {
        self.nodes.borrow()[element.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&self, element: &MockElement, class: &str) -> Result<(), ZoomError> {
        self.check_class_change()?;
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, element: &MockElement, class: &str) -> Result<(), ZoomError> {
        self.check_class_change()?;
        self.nodes.borrow_mut()[element.0].classes.retain(|c| c != class);
        Ok(())
    }

    fn set_background(&self, element: &MockElement, css: &str) -> Result<(), ZoomError> {
        self.nodes.borrow_mut()[element.0].background = Some(css.to_string());
        Ok(())
    }

    fn listen(
        &self,
        target: ListenTarget<MockElement>,
        kind: EventKind,
        handler: Handler<MockElement>,
    ) -> Result<usize, ZoomError> {
        let mut listeners = self.listeners.borrow_mut();
        listeners.push(Some(Registered {
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        }));
        Ok(listeners.len() - 1)
    }

    fn unlisten(&self, listener: usize) {
        if let Some(slot) = self.listeners.borrow_mut().get_mut(listener) {
            *slot = None;
        }
    }
}
