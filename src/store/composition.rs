//! 组装 store：当前正在拼装的汉堡
//!
//! - 最多一个底座（bun），加入新底座会替换旧的
//! - 其余配料按加入顺序追加，顺序即成品的叠放顺序
//! - 同一目录配料可以出现多次，靠实例 id 区分

use super::Reducer;
use stellar_burger_shared::Ingredient;
use uuid::Uuid;

/// 组装中的一个配料实例
#[derive(Debug, Clone, PartialEq)]
pub struct BuildItem {
    /// 本地生成的实例 id，仅在当前组装内唯一
    pub instance_id: String,
    pub part: Ingredient,
}

impl BuildItem {
    pub fn new(part: Ingredient) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            part,
        }
    }

    pub fn catalog_id(&self) -> &str {
        &self.part.id
    }

    pub fn price(&self) -> u32 {
        self.part.price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompositionAction {
    Add(BuildItem),
    Remove { instance_id: String },
    MoveUp(usize),
    MoveDown(usize),
    Reset,
}

impl CompositionAction {
    /// 为配料分配新的实例 id 并生成加入动作
    pub fn add(part: Ingredient) -> Self {
        Self::Add(BuildItem::new(part))
    }

    pub fn remove(instance_id: impl Into<String>) -> Self {
        Self::Remove {
            instance_id: instance_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composition {
    pub base: Option<BuildItem>,
    pub fillings: Vec<BuildItem>,
}

impl Reducer for Composition {
    type Event = CompositionAction;

    fn reduce(&mut self, action: CompositionAction) {
        match action {
            CompositionAction::Add(item) if item.part.kind.is_base() => {
                self.base = Some(item);
            }
            CompositionAction::Add(item) => self.fillings.push(item),
            CompositionAction::Remove { instance_id } => {
                self.fillings.retain(|item| item.instance_id != instance_id);
            }
            CompositionAction::MoveUp(index) => {
                if index > 0 && index < self.fillings.len() {
                    self.fillings.swap(index, index - 1);
                }
            }
            CompositionAction::MoveDown(index) => {
                if index < self.fillings.len().saturating_sub(1) {
                    self.fillings.swap(index, index + 1);
                }
            }
            CompositionAction::Reset => *self = Self::default(),
        }
    }
}

impl Composition {
    pub fn add_part(&mut self, part: Ingredient) {
        self.reduce(CompositionAction::add(part));
    }

    pub fn remove_part(&mut self, instance_id: &str) {
        self.reduce(CompositionAction::remove(instance_id));
    }

    pub fn move_up(&mut self, index: usize) {
        self.reduce(CompositionAction::MoveUp(index));
    }

    pub fn move_down(&mut self, index: usize) {
        self.reduce(CompositionAction::MoveDown(index));
    }

    pub fn reset(&mut self) {
        self.reduce(CompositionAction::Reset);
    }

    /// 总价：底座上下两片计两份
    pub fn total_price(&self) -> u32 {
        let base = self.base.as_ref().map_or(0, |b| b.price() * 2);
        base + self.fillings.iter().map(BuildItem::price).sum::<u32>()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.fillings.is_empty()
    }

    /// 目录配料在组装中用到的份数（底座计 2）
    pub fn count_of(&self, catalog_id: &str) -> usize {
        let base = match &self.base {
            Some(b) if b.catalog_id() == catalog_id => 2,
            _ => 0,
        };
        base + self
            .fillings
            .iter()
            .filter(|item| item.catalog_id() == catalog_id)
            .count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use stellar_burger_shared::IngredientKind;

    pub fn part(id: &str, kind: IngredientKind, price: u32) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: format!("{} ({:?})", id, kind),
            kind,
            proteins: 1,
            fat: 2,
            carbohydrates: 3,
            calories: 4,
            price,
            image: String::new(),
            image_large: String::new(),
            image_mobile: String::new(),
        }
    }

    fn ids(c: &Composition) -> Vec<&str> {
        c.fillings.iter().map(|i| i.instance_id.as_str()).collect()
    }

    fn filled(n: usize) -> Composition {
        let mut c = Composition::default();
        for i in 0..n {
            c.add_part(part(&format!("f{}", i), IngredientKind::Main, 10));
        }
        c
    }

    #[test]
    fn base_is_replaced_not_appended() {
        let mut c = Composition::default();
        c.add_part(part("b1", IngredientKind::Bun, 100));
        c.add_part(part("b2", IngredientKind::Bun, 200));

        assert_eq!(c.base.as_ref().unwrap().catalog_id(), "b2");
        assert!(c.fillings.is_empty());
    }

    #[test]
    fn duplicates_get_distinct_instance_ids() {
        let mut c = Composition::default();
        let sauce = part("s", IngredientKind::Sauce, 5);
        c.add_part(sauce.clone());
        c.add_part(sauce);

        assert_eq!(c.fillings.len(), 2);
        assert_ne!(c.fillings[0].instance_id, c.fillings[1].instance_id);
        assert_eq!(c.count_of("s"), 2);
    }

    #[test]
    fn remove_is_idempotent_and_spares_the_base() {
        let mut c = filled(2);
        c.add_part(part("b", IngredientKind::Bun, 100));
        let target = c.fillings[0].instance_id.clone();
        let base_id = c.base.as_ref().unwrap().instance_id.clone();

        c.remove_part(&target);
        let after_first = c.clone();
        c.remove_part(&target);
        c.remove_part(&base_id);

        assert_eq!(c, after_first);
        assert_eq!(c.fillings.len(), 1);
        assert!(c.base.is_some());
    }

    #[test]
    fn boundary_moves_are_noops() {
        let mut c = filled(3);
        let before = c.clone();

        c.move_up(0);
        c.move_down(2);
        c.move_up(7);
        c.move_down(7);
        c.move_up(usize::MAX);
        c.move_down(usize::MAX);

        assert_eq!(c, before);
        Composition::default().move_down(0);
    }

    #[test]
    fn move_up_then_down_restores_order() {
        let mut c = filled(4);
        let original: Vec<String> = ids(&c).into_iter().map(String::from).collect();

        c.move_up(2);
        assert_eq!(ids(&c)[1], original[2]);
        c.move_down(1);

        assert_eq!(ids(&c), original);
    }

    #[test]
    fn base_is_priced_twice() {
        let mut c = Composition::default();
        c.add_part(part("a", IngredientKind::Main, 7));
        c.add_part(part("b", IngredientKind::Sauce, 11));
        assert_eq!(c.total_price(), 18);

        c.add_part(part("bun", IngredientKind::Bun, 50));
        assert_eq!(c.total_price(), 2 * 50 + 7 + 11);
        assert_eq!(c.count_of("bun"), 2);
    }

    #[test]
    fn reset_empties_everything() {
        let mut c = filled(3);
        c.add_part(part("b", IngredientKind::Bun, 1));
        c.reset();
        assert!(c.is_empty());
        assert_eq!(c, Composition::default());
    }

    fn kind_strategy() -> impl Strategy<Value = IngredientKind> {
        prop_oneof![
            Just(IngredientKind::Bun),
            Just(IngredientKind::Main),
            Just(IngredientKind::Sauce),
        ]
    }

    proptest! {
        #[test]
        fn fillings_count_matches_non_base_inserts(kinds in prop::collection::vec(kind_strategy(), 0..40)) {
            let mut c = Composition::default();
            for (i, kind) in kinds.iter().enumerate() {
                c.add_part(part(&i.to_string(), *kind, 1));
            }
            let non_base = kinds.iter().filter(|k| !k.is_base()).count();
            prop_assert_eq!(c.fillings.len(), non_base);
            prop_assert_eq!(c.base.is_some(), kinds.iter().any(|k| k.is_base()));
        }

        #[test]
        fn move_up_and_back_is_identity(len in 2usize..12, seed in any::<usize>()) {
            let mut c = filled(len);
            let before = c.clone();
            let i = 1 + seed % (len - 1);
            c.move_up(i);
            c.move_down(i - 1);
            prop_assert_eq!(c, before);
        }

        #[test]
        fn edge_moves_never_change_order(
            kinds in prop::collection::vec(kind_strategy(), 0..20),
            far in any::<usize>(),
        ) {
            let mut c = Composition::default();
            for (i, kind) in kinds.iter().enumerate() {
                c.add_part(part(&i.to_string(), *kind, 1));
            }
            let before = c.clone();
            let len = c.fillings.len();

            c.move_up(0);
            c.move_down(len.saturating_sub(1));
            c.move_up(len.saturating_add(far % 8));
            c.move_down(len.saturating_add(far));

            prop_assert_eq!(c, before);
        }
    }
}
