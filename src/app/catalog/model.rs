//! 商品数据模型

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 由 API 分配的不透明标识，可能是数字也可能是字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

/// 商品
///
/// 未经服务器确认的商品没有 `id`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(rename = "nameProduct")]
    pub name: String,
    #[serde(rename = "priceProduct", deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(rename = "descriptionProducto")]
    pub description: String,
}

impl Product {
    pub fn from_draft(id: Option<ProductId>, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
        }
    }
}

/// 创建请求体：不带 `id` 的商品字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(rename = "nameProduct")]
    pub name: String,
    #[serde(rename = "priceProduct", deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(rename = "descriptionProducto")]
    pub description: String,
}

/// 价格字段兼容 JSON 字符串和数字
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_wire_names() {
        let product = Product {
            id: Some(ProductId::Number(1)),
            name: "Pen".to_string(),
            price: "2".to_string(),
            description: "Blue pen".to_string(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "nameProduct": "Pen", "priceProduct": "2", "descriptionProducto": "Blue pen"})
        );
    }

    #[test]
    fn test_product_without_id_omits_field() {
        let product: Product = serde_json::from_value(
            json!({"nameProduct": "Pen", "priceProduct": "2", "descriptionProducto": "Blue pen"}),
        )
        .unwrap();
        assert!(product.id.is_none());
        assert!(serde_json::to_value(&product).unwrap().get("id").is_none());
    }

    #[test]
    fn test_string_id_and_numeric_price() {
        let product: Product = serde_json::from_value(
            json!({"id": "a1f3", "nameProduct": "Lápiz", "priceProduct": 1.5, "descriptionProducto": "HB"}),
        )
        .unwrap();
        assert_eq!(product.id, Some(ProductId::from("a1f3")));
        assert_eq!(product.price, "1.5");
        assert_eq!(product.id.unwrap().to_string(), "a1f3");
    }
}
