//! 表单控制器：字段、校验以及新增/编辑模式切换

use super::model::{Product, ProductDraft, ProductId};
use crate::core::error::ValidationError;
use std::borrow::Cow;
use tracing::debug;
use validator::Validate;

pub const ADD_LABEL: &str = "添加商品";
pub const UPDATE_LABEL: &str = "更新商品";
pub const CANCEL_LABEL: &str = "取消编辑";

/// 提交按钮样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStyle {
    Primary,
    Warning,
}

impl SubmitStyle {
    pub fn class(&self) -> &'static str {
        match self {
            SubmitStyle::Primary => "form-control btn btn-primary",
            SubmitStyle::Warning => "form-control btn btn-warning",
        }
    }
}

/// 提交按钮当前的文字和样式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: Cow<'static, str>,
    pub style: SubmitStyle,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: Cow::Borrowed(ADD_LABEL),
            style: SubmitStyle::Primary,
        }
    }
}

/// 编辑会话，仅在编辑模式下存在
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target_id: Option<ProductId>,
}

#[derive(Debug, Validate)]
struct ProductInput {
    #[validate(length(min = 3))]
    name: String,
    #[validate(custom(function = "positive_price"))]
    price: String,
}

fn positive_price(price: &str) -> Result<(), validator::ValidationError> {
    match price.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(()),
        _ => Err(validator::ValidationError::new("positive_price")),
    }
}

/// 校验表单输入，按"空字段、价格、名称长度"的顺序报告第一个错误
pub fn validate(name: &str, price: &str, description: &str) -> Result<(), ValidationError> {
    if name.is_empty() || price.is_empty() || description.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    let input = ProductInput {
        name: name.to_string(),
        price: price.to_string(),
    };
    if let Err(errors) = input.validate() {
        let fields = errors.field_errors();
        if fields.contains_key("price") {
            return Err(ValidationError::PriceNotPositive);
        }
        if fields.contains_key("name") {
            return Err(ValidationError::NameTooShort);
        }
    }

    Ok(())
}

#[derive(Debug, Default)]
pub struct FormController {
    name: String,
    price: String,
    description: String,
    submit: SubmitControl,
    cancel_visible: bool,
    session: Option<EditSession>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_price(&mut self, value: impl Into<String>) {
        self.price = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 读取并校验当前字段，成功时返回去除首尾空白后的请求体
    pub fn draft(&self) -> Result<ProductDraft, ValidationError> {
        let name = self.name.trim();
        let price = self.price.trim();
        let description = self.description.trim();
        validate(name, price, description)?;

        Ok(ProductDraft {
            name: name.to_string(),
            price: price.to_string(),
            description: description.to_string(),
        })
    }

    /// 清空字段，不改变模式
    pub fn reset(&mut self) {
        self.name.clear();
        self.price.clear();
        self.description.clear();
    }

    pub fn enter_edit_mode(&mut self, product: &Product) {
        self.session = Some(EditSession {
            target_id: product.id.clone(),
        });
        self.name = product.name.clone();
        self.price = product.price.clone();
        self.description = product.description.clone();
        self.submit = SubmitControl {
            label: Cow::Borrowed(UPDATE_LABEL),
            style: SubmitStyle::Warning,
        };
        // 已经在编辑时不重复添加取消按钮
        self.cancel_visible = true;
        debug!("进入编辑模式: {:?}", product.id);
    }

    pub fn exit_edit_mode(&mut self) {
        self.reset();
        self.submit = SubmitControl::default();
        self.cancel_visible = false;
        self.session = None;
        debug!("退出编辑模式");
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    /// 取消按钮的文字；不在编辑模式时没有取消按钮
    pub fn cancel_control(&self) -> Option<&'static str> {
        self.cancel_visible.then_some(CANCEL_LABEL)
    }
}
