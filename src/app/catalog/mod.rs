//! 商品目录编辑器

pub mod form;
pub mod model;
pub mod orchestrator;
pub mod renderer;
pub mod state;

pub use form::{EditSession, FormController, SubmitControl, SubmitStyle};
pub use model::{Product, ProductDraft, ProductId};
pub use orchestrator::{Confirm, Orchestrator, Phase, UiEvent};
pub use renderer::{ActionBinding, ActionKind, RenderedRow, Renderer};
pub use state::CatalogState;
