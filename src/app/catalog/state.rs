//! 内存中的商品目录，渲染的唯一数据来源

use super::model::{Product, ProductId};

/// 有序商品集合，插入顺序即显示顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    products: Vec<Product>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn append(&mut self, product: Product) {
        self.products.push(product);
    }

    /// 替换第一个匹配 `id` 的商品，位置不变；找不到时返回 false
    pub fn replace_by_id(&mut self, id: &ProductId, product: Product) -> bool {
        match self
            .products
            .iter_mut()
            .find(|p| p.id.as_ref() == Some(id))
        {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// 删除所有匹配 `id` 的商品，返回删除数量
    pub fn remove_by_id(&mut self, id: &ProductId) -> usize {
        let before = self.products.len();
        self.products.retain(|p| p.id.as_ref() != Some(id));
        before - self.products.len()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_ref() == Some(id))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: Some(ProductId::Number(id)),
            name: name.to_string(),
            price: "10".to_string(),
            description: format!("{} desc", name),
        }
    }

    #[test]
    fn test_append_keeps_order() {
        let mut state = CatalogState::new();
        state.append(product(1, "Pen"));
        state.append(product(2, "Cup"));
        assert_eq!(state.len(), 2);
        assert_eq!(state.products()[1].name, "Cup");
    }

    #[test]
    fn test_replace_by_id_keeps_position() {
        let mut state = CatalogState::new();
        state.replace_all(vec![product(1, "Pen"), product(2, "Cup"), product(3, "Mug")]);

        assert!(state.replace_by_id(&ProductId::Number(2), product(2, "Bowl")));
        assert_eq!(state.len(), 3);
        assert_eq!(state.products()[1].name, "Bowl");

        assert!(!state.replace_by_id(&ProductId::Number(9), product(9, "Nope")));
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_remove_by_id() {
        let mut state = CatalogState::new();
        state.replace_all(vec![product(1, "Pen"), product(2, "Cup")]);

        assert_eq!(state.remove_by_id(&ProductId::Number(1)), 1);
        assert!(state.get(&ProductId::Number(1)).is_none());
        assert_eq!(state.len(), 1);

        assert_eq!(state.remove_by_id(&ProductId::Number(1)), 0);
    }
}
