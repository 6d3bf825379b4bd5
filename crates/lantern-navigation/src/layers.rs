use std::fmt;

use smallvec::SmallVec;

/// One dismissible overlay concern. Each visibility flag owns exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Write,
    QuestionCompose,
    PostDetail,
    TitlesCollection,
    TitleShop,
    Achievements,
    UserProfile,
    MyContentList,
    FollowList,
    MyPage,
    NoteDetail,
    Notes,
    Category,
    NotificationSettings,
    Ranking,
    Bookmarks,
    Search,
    Quiz,
    Theme,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Write => "write",
            Layer::QuestionCompose => "questionCompose",
            Layer::PostDetail => "postDetail",
            Layer::TitlesCollection => "titlesCollection",
            Layer::TitleShop => "titleShop",
            Layer::Achievements => "achievements",
            Layer::UserProfile => "userProfile",
            Layer::MyContentList => "myContentList",
            Layer::FollowList => "followList",
            Layer::MyPage => "myPage",
            Layer::NoteDetail => "noteDetail",
            Layer::Notes => "notes",
            Layer::Category => "category",
            Layer::NotificationSettings => "notificationSettings",
            Layer::Ranking => "ranking",
            Layer::Bookmarks => "bookmarks",
            Layer::Search => "search",
            Layer::Quiz => "quiz",
            Layer::Theme => "theme",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LIFO of open overlays, duplicate-free.
///
/// `push` has move-to-top semantics and `remove` works anywhere in the stack,
/// so a background overlay can be dismissed without touching the ones above it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerStack {
    entries: SmallVec<[Layer; 8]>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer) {
        self.entries.retain(|l| *l != layer);
        self.entries.push(layer);
    }

    /// Returns whether `layer` was present.
    pub fn remove(&mut self, layer: Layer) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| *l != layer);
        self.entries.len() != before
    }

    pub fn pop(&mut self) -> Option<Layer> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn sync(&mut self, layer: Layer, active: bool) {
        if active {
            self.push(layer);
        } else {
            self.remove(layer);
        }
    }

    pub fn top(&self) -> Option<Layer> {
        self.entries.last().copied()
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.entries.contains(&layer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.entries.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Layer> {
        self.entries.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Layer; 19] = [
        Layer::Write,
        Layer::QuestionCompose,
        Layer::PostDetail,
        Layer::TitlesCollection,
        Layer::TitleShop,
        Layer::Achievements,
        Layer::UserProfile,
        Layer::MyContentList,
        Layer::FollowList,
        Layer::MyPage,
        Layer::NoteDetail,
        Layer::Notes,
        Layer::Category,
        Layer::NotificationSettings,
        Layer::Ranking,
        Layer::Bookmarks,
        Layer::Search,
        Layer::Quiz,
        Layer::Theme,
    ];

    #[derive(Clone, Debug)]
    enum Op {
        Push(Layer),
        Remove(Layer),
        Pop,
        Sync(Layer, bool),
    }

    fn arb_layer() -> impl Strategy<Value = Layer> {
        (0..ALL.len()).prop_map(|i| ALL[i])
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            arb_layer().prop_map(Op::Push),
            arb_layer().prop_map(Op::Remove),
            Just(Op::Pop),
            (arb_layer(), any::<bool>()).prop_map(|(l, a)| Op::Sync(l, a)),
        ]
    }

    #[test]
    fn push_moves_to_top() {
        let mut s = LayerStack::new();
        s.push(Layer::MyPage);
        s.push(Layer::Theme);
        s.push(Layer::MyPage);
        assert_eq!(s.to_vec(), vec![Layer::Theme, Layer::MyPage]);
        s.push(Layer::MyPage);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn remove_works_below_the_top() {
        let mut s = LayerStack::new();
        s.push(Layer::MyPage);
        s.push(Layer::FollowList);
        s.push(Layer::PostDetail);
        assert!(s.remove(Layer::FollowList));
        assert!(!s.remove(Layer::FollowList));
        assert_eq!(s.to_vec(), vec![Layer::MyPage, Layer::PostDetail]);
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut s = LayerStack::new();
        assert_eq!(s.pop(), None);
        s.sync(Layer::Search, true);
        assert_eq!(s.top(), Some(Layer::Search));
        assert_eq!(s.pop(), Some(Layer::Search));
        assert!(s.is_empty());
    }

    #[test]
    fn pop_then_push_restores_relative_order() {
        let mut s = LayerStack::new();
        s.push(Layer::MyPage);
        s.push(Layer::NotificationSettings);
        let popped = s.pop().unwrap();
        s.push(popped);
        assert_eq!(
            s.to_vec(),
            vec![Layer::MyPage, Layer::NotificationSettings]
        );
    }

    proptest! {
        #[test]
        fn never_holds_duplicates(ops in prop::collection::vec(arb_op(), 0..64)) {
            let mut s = LayerStack::new();
            for op in ops {
                match op {
                    Op::Push(l) => s.push(l),
                    Op::Remove(l) => { s.remove(l); }
                    Op::Pop => { s.pop(); }
                    Op::Sync(l, a) => s.sync(l, a),
                }
                let mut seen = s.to_vec();
                seen.sort();
                seen.dedup();
                prop_assert_eq!(seen.len(), s.len());
            }
        }

        #[test]
        fn pop_push_keeps_untouched_order(layers in prop::collection::vec(arb_layer(), 1..19)) {
            let mut s = LayerStack::new();
            for l in &layers {
                s.push(*l);
            }
            let before = s.to_vec();
            let top = s.pop().unwrap();
            s.push(top);
            prop_assert_eq!(s.to_vec(), before);
        }

        #[test]
        fn sync_false_always_removes(layers in prop::collection::vec(arb_layer(), 0..19), target in arb_layer()) {
            let mut s = LayerStack::new();
            for l in &layers {
                s.push(*l);
            }
            s.sync(target, false);
            prop_assert!(!s.contains(target));
        }
    }
}
