//! 列表渲染器
//!
//! 每次 `render` 都丢弃旧的行并按目录顺序重建，行上的编辑/删除操作与本次渲染的
//! 代次绑定，旧代次的操作不会再解析到任何商品。

use super::model::Product;
use std::fmt;

/// 行上的操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Edit,
    Delete,
}

/// 绑定到某次渲染中某一行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBinding {
    pub generation: u64,
    pub row: usize,
    pub kind: ActionKind,
}

/// 渲染出的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// 渲染时捕获的商品快照
    pub product: Product,
    pub title: String,
    pub price: String,
    pub description: String,
    pub id_label: String,
    pub edit: ActionBinding,
    pub delete: ActionBinding,
}

impl fmt::Display for RenderedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  价格: {}", self.price)?;
        writeln!(f, "  描述: {}", self.description)?;
        write!(f, "  {}", self.id_label)
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    generation: u64,
    rows: Vec<RenderedRow>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, products: &[Product]) -> &[RenderedRow] {
        self.rows.clear();
        self.generation += 1;
        let generation = self.generation;

        self.rows.extend(products.iter().enumerate().map(|(row, product)| {
            let id_label = match &product.id {
                Some(id) => format!("ID: {}", id),
                None => "ID: -".to_string(),
            };
            RenderedRow {
                product: product.clone(),
                title: product.name.clone(),
                price: format!("${}", product.price),
                description: product.description.clone(),
                id_label,
                edit: ActionBinding {
                    generation,
                    row,
                    kind: ActionKind::Edit,
                },
                delete: ActionBinding {
                    generation,
                    row,
                    kind: ActionKind::Delete,
                },
            }
        }));

        &self.rows
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 解析操作对应的行；来自旧渲染的操作返回 None
    pub fn resolve(&self, binding: &ActionBinding) -> Option<&RenderedRow> {
        if binding.generation != self.generation {
            return None;
        }
        self.rows.get(binding.row)
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "(目录为空)");
        }
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "#{} {}", i + 1, row)?;
        }
        Ok(())
    }
}
