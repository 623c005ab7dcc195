use crate::geometry::Rotor;
use derive_more::{AsRef, Deref, Display, From, Into};

pub const ROOT_COUNT: usize = 8;
const BRANCH_SUFFIX: &str = "...";
const PLACEHOLDER_LABEL: &str = "<legacy here>";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ActionName(String);

crate::impl_string_newtype!(ActionName);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: ActionName,
}

/// Index of a node in a [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("#{_0}")]
pub struct ItemId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Children {
    /// Entered across the top boundary.
    pub left: ItemId,
    /// Entered across the bottom boundary.
    pub right: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: Label,
    pub children: Option<Children>,
    /// Present only on leaves; placeholders have neither children nor action.
    pub action: Option<Action>,
}

impl MenuItem {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }
}

/// Nested description of a menu, flattened into a [`MenuTree`].
#[derive(Debug, Clone)]
pub enum Entry {
    Branch {
        label: String,
        left: Box<Entry>,
        right: Box<Entry>,
    },
    Leaf(String),
    Placeholder(String),
}

impl Entry {
    pub fn branch(label: &str, left: Entry, right: Entry) -> Self {
        Self::Branch {
            label: label.to_owned(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn leaf(label: &str) -> Self {
        Self::Leaf(label.to_owned())
    }

    pub fn placeholder() -> Self {
        Self::Placeholder(PLACEHOLDER_LABEL.to_owned())
    }
}

/// Immutable arena holding one binary tree per root octant.
#[derive(Debug, Clone)]
pub struct MenuTree {
    items: Vec<MenuItem>,
    roots: [ItemId; ROOT_COUNT],
    max_depth: usize,
}

impl MenuTree {
    pub fn new(roots: [Entry; ROOT_COUNT]) -> Self {
        let mut items = Vec::new();
        let mut max_depth = 0;
        let roots = roots.map(|entry| {
            let (id, depth) = Self::insert(&mut items, entry);
            max_depth = max_depth.max(depth);
            id
        });
        Self {
            items,
            roots,
            max_depth,
        }
    }

    /// Returns the new node's id and the depth of its subtree.
    fn insert(items: &mut Vec<MenuItem>, entry: Entry) -> (ItemId, usize) {
        let id = ItemId(items.len());
        match entry {
            Entry::Leaf(label) => {
                items.push(MenuItem {
                    label: Label::new(label.clone()),
                    children: None,
                    action: Some(Action {
                        name: ActionName::new(label),
                    }),
                });
                (id, 1)
            }
            Entry::Placeholder(label) => {
                items.push(MenuItem {
                    label: Label::new(label),
                    children: None,
                    action: None,
                });
                (id, 1)
            }
            Entry::Branch { label, left, right } => {
                // reserve the slot so the parent precedes its children
                items.push(MenuItem {
                    label: Label::new(label + BRANCH_SUFFIX),
                    children: None,
                    action: None,
                });
                let (left, left_depth) = Self::insert(items, *left);
                let (right, right_depth) = Self::insert(items, *right);
                items[id.0].children = Some(Children { left, right });
                (id, 1 + left_depth.max(right_depth))
            }
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.get(id.0)
    }

    pub fn root(&self, rot: Rotor) -> ItemId {
        self.roots[rot.index()]
    }

    pub fn roots(&self) -> &[ItemId; ROOT_COUNT] {
        &self.roots
    }

    /// Number of frames on the longest root-to-leaf path.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, label: &str) -> Option<ItemId> {
        self.items
            .iter()
            .position(|item| item.label.as_str() == label)
            .map(ItemId)
    }

    /// Pre-order listing of the subtree under `id`, paired with each node's depth
    /// below it.
    pub fn outline(&self, id: ItemId) -> Vec<(usize, ItemId)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, id)];
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            if let Some(children) = self.get(id).and_then(|item| item.children) {
                stack.push((depth + 1, children.right));
                stack.push((depth + 1, children.left));
            }
        }
        out
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        use Entry as E;

        // labels follow the numeric keypad: the root digit is the direction
        Self::new([
            E::branch(
                "6",
                E::branch("6U", E::leaf("6UL"), E::leaf("6UR")),
                E::branch("6D", E::leaf("6DR"), E::leaf("6DL")),
            ),
            E::branch(
                "3",
                E::branch(
                    "3U",
                    E::branch("3UL", E::leaf("3ULD"), E::leaf("3ULU")),
                    E::branch("3UR", E::leaf("3URU"), E::leaf("3URD")),
                ),
                E::branch("3L", E::leaf("3LD"), E::leaf("3LU")),
            ),
            E::placeholder(),
            E::branch("1", E::leaf("1R"), E::leaf("1U")),
            E::branch(
                "4",
                E::branch("4D", E::leaf("4DR"), E::leaf("4DL")),
                E::branch("4U", E::leaf("4UL"), E::leaf("4UR")),
            ),
            E::branch(
                "7",
                E::branch("7D", E::leaf("7DR"), E::leaf("7DL")),
                E::branch("7R", E::leaf("7RU"), E::leaf("7RD")),
            ),
            E::placeholder(),
            E::leaf("9"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tree_shape() {
        let tree = MenuTree::default();
        assert_eq!(tree.max_depth(), 4);
        assert_eq!(tree.roots().len(), ROOT_COUNT);

        let labels: Vec<_> = Rotor::all()
            .map(|r| tree.get(tree.root(r)).unwrap().label.to_string())
            .collect();
        assert_eq!(
            labels,
            [
                "6...",
                "3...",
                "<legacy here>",
                "1...",
                "4...",
                "7...",
                "<legacy here>",
                "9"
            ]
        );
    }

    #[test]
    fn test_placeholders_have_no_action() {
        let tree = MenuTree::default();
        for index in [2, 6] {
            let item = tree.get(tree.root(Rotor::new(index))).unwrap();
            assert!(item.is_leaf());
            assert!(item.action().is_none());
        }
    }

    #[test]
    fn test_leaves_report_their_label() {
        let tree = MenuTree::default();
        let id = tree.find("6UL").unwrap();
        let item = tree.get(id).unwrap();
        assert!(item.is_leaf());
        assert_eq!(item.action().unwrap().name.as_str(), "6UL");

        let nine = tree.get(tree.root(Rotor::new(7))).unwrap();
        assert_eq!(nine.action().unwrap().name, ActionName::from("9"));
    }

    #[test]
    fn test_children_order() {
        let tree = MenuTree::default();
        let root = tree.get(tree.root(Rotor::new(1))).unwrap();
        let children = root.children.unwrap();
        assert_eq!(tree.get(children.left).unwrap().label.as_str(), "3U...");
        assert_eq!(tree.get(children.right).unwrap().label.as_str(), "3L...");
    }

    #[test]
    fn test_outline_is_preorder() {
        let tree = MenuTree::default();
        let outline: Vec<_> = tree
            .outline(tree.root(Rotor::new(3)))
            .into_iter()
            .map(|(depth, id)| (depth, tree.get(id).unwrap().label.to_string()))
            .collect();
        assert_eq!(
            outline,
            [
                (0, "1...".to_string()),
                (1, "1R".to_string()),
                (1, "1U".to_string())
            ]
        );
    }

    #[test]
    fn test_unknown_id_is_none() {
        let tree = MenuTree::default();
        assert!(tree.get(ItemId(tree.len())).is_none());
    }
}
