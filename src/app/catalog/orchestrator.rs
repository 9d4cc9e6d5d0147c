//! 编排层
//!
//! 把页面就绪、表单提交、行上的编辑/删除/取消事件接到 API 客户端、目录状态、
//! 本地缓存、渲染器和表单控制器上。所有错误都在这里恢复为提示消息，
//! 每个动作结束时都回到 `Phase::Idle`。

use super::form::FormController;
use super::model::{Product, ProductId};
use super::renderer::{ActionBinding, ActionKind, Renderer};
use super::state::CatalogState;
use crate::core::error::{CatalogError, Result, ValidationError};
use crate::core::notice::{NoticeBoard, Severity};
use crate::infrastructure::api_client::ProductApi;
use crate::infrastructure::cache::{KeyValueStore, LocalCache};
use tracing::{debug, error, info, warn};

pub const DELETE_PROMPT: &str = "确定要删除这个商品吗？";

/// 编排层所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Submitting,
    Deleting,
}

/// 删除前向用户确认
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// 前端可以触发的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Ready,
    Submit,
    Action(ActionBinding),
    Cancel,
}

pub struct Orchestrator<A, S> {
    api: A,
    cache: LocalCache<S>,
    state: CatalogState,
    renderer: Renderer,
    form: FormController,
    notices: NoticeBoard,
    phase: Phase,
}

impl<A: ProductApi, S: KeyValueStore> Orchestrator<A, S> {
    pub fn new(api: A, cache: LocalCache<S>, notices: NoticeBoard) -> Self {
        Self {
            api,
            cache,
            state: CatalogState::new(),
            renderer: Renderer::new(),
            form: FormController::new(),
            notices,
            phase: Phase::Idle,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &LocalCache<S> {
        &self.cache
    }

    /// 分发一个前端事件；删除操作通过 `confirm` 询问用户
    pub async fn handle(&mut self, event: UiEvent, confirm: &mut impl Confirm) {
        match event {
            UiEvent::Ready => self.load().await,
            UiEvent::Submit => self.submit().await,
            UiEvent::Cancel => self.cancel_edit(),
            UiEvent::Action(binding) => match binding.kind {
                ActionKind::Edit => self.edit(&binding),
                ActionKind::Delete => self.delete(&binding, confirm).await,
            },
        }
    }

    /// 页面就绪：从 API 加载，失败时回退到本地缓存
    pub async fn load(&mut self) {
        self.enter(Phase::Loading);

        match self.api.list().await {
            Ok(products) => {
                self.state.replace_all(products);
                self.persist();
                self.render();
                self.notices.show(Severity::Success, "商品加载成功");
            }
            Err(e) => {
                error!("从 API 加载商品失败: {}", e);
                match self.load_from_cache() {
                    Ok(count) => {
                        warn!("已从本地缓存恢复 {} 个商品", count);
                        self.notices.show(Severity::Warning, "已从本地缓存加载商品");
                    }
                    Err(e) => {
                        error!("{}", e);
                        self.notices.show(Severity::Danger, "无法加载商品");
                    }
                }
            }
        }

        self.enter(Phase::Idle);
    }

    fn load_from_cache(&mut self) -> Result<usize> {
        let products = self.cache.try_load().ok_or(CatalogError::CacheMiss)?;
        let count = products.len();
        self.state.replace_all(products);
        self.render();
        Ok(count)
    }

    /// 表单提交：不在编辑模式时新增，否则更新编辑中的商品
    pub async fn submit(&mut self) {
        self.enter(Phase::Submitting);

        if self.form.is_editing() {
            match self.try_update().await {
                Ok(product) => {
                    info!("商品已更新: {:?}", product.id);
                    self.form.exit_edit_mode();
                    self.notices.show(Severity::Success, "商品更新成功");
                }
                Err(e) => self.report(e, "更新商品失败"),
            }
        } else {
            match self.try_create().await {
                Ok(product) => {
                    info!("商品已保存: {:?}", product.id);
                    self.form.reset();
                    self.notices.show(Severity::Success, "商品添加成功");
                }
                Err(e) => self.report(e, "保存商品失败"),
            }
        }

        self.enter(Phase::Idle);
    }

    async fn try_create(&mut self) -> Result<Product> {
        let draft = self.form.draft()?;
        let saved = self.api.create(&draft).await?;

        self.state.append(saved.clone());
        self.persist();
        self.render();
        Ok(saved)
    }

    async fn try_update(&mut self) -> Result<Product> {
        let draft = self.form.draft()?;
        let target = self
            .form
            .session()
            .and_then(|session| session.target_id.clone())
            .ok_or(ValidationError::MissingId)?;

        let product = Product::from_draft(Some(target.clone()), draft);
        let saved = self.api.update(&target, &product).await?;

        if !self.state.replace_by_id(&target, saved.clone()) {
            warn!("更新的商品 {} 不在本地目录中", target);
        }
        self.persist();
        self.render();
        Ok(saved)
    }

    /// 行上的编辑操作
    ///
    /// 所有动作都持有 `&mut self` 并在返回前回到 `Phase::Idle`，所以这里总是处于空闲阶段。
    pub fn edit(&mut self, binding: &ActionBinding) {
        let Some(row) = self.renderer.resolve(binding) else {
            warn!("忽略过期的编辑操作: {:?}", binding);
            return;
        };
        let product = row.product.clone();
        self.form.enter_edit_mode(&product);
    }

    pub fn cancel_edit(&mut self) {
        if self.form.is_editing() {
            self.form.exit_edit_mode();
        }
    }

    /// 行上的删除操作：用户拒绝确认时不做任何事
    pub async fn delete(&mut self, binding: &ActionBinding, confirm: &mut impl Confirm) {
        let Some(row) = self.renderer.resolve(binding) else {
            warn!("忽略过期的删除操作: {:?}", binding);
            return;
        };
        let id = row.product.id.clone();

        if !confirm.confirm(DELETE_PROMPT) {
            return;
        }

        self.enter(Phase::Deleting);
        match self.try_delete(id).await {
            Ok(id) => {
                info!("商品已删除: {}", id);
                self.notices.show(Severity::Info, "商品已删除");
            }
            Err(e) => self.report(e, "删除商品失败"),
        }
        self.enter(Phase::Idle);
    }

    async fn try_delete(&mut self, id: Option<ProductId>) -> Result<ProductId> {
        let id = id.ok_or(ValidationError::MissingId)?;
        self.api.delete(&id).await?;

        self.state.remove_by_id(&id);
        self.persist();
        self.render();
        Ok(id)
    }

    fn persist(&self) {
        if let Err(e) = self.cache.save(self.state.products()) {
            warn!("写入本地缓存失败: {}", e);
        }
    }

    fn render(&mut self) {
        self.renderer.render(self.state.products());
    }

    fn report(&self, err: CatalogError, context: &str) {
        match &err {
            CatalogError::Validation(e) => {
                warn!("{}: {}", context, e);
                self.notices.show(Severity::Danger, e.to_string());
            }
            _ => {
                error!("{}: {}", context, err);
                self.notices.show(Severity::Danger, context);
            }
        }
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!("阶段 {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
