//! AppBuilder - ボードの構築とワイヤリング
//!
//! store を 1 つ作り、入力フォームと 2 つの列を mount した `App` を返します。
//! 設定の不整合は build() 時に BuildError で止める（Fail-fast）。

use std::sync::Arc;

use super::view::{ProjectInput, ProjectList, View, ViewError, mount};
use crate::domain::{Project, ProjectId, ProjectStatus};
use crate::ports::ProjectStore;
use crate::settings::{BoardSettings, SettingsError};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```
/// use projboard_core::app::AppBuilder;
/// use projboard_core::settings::BoardSettings;
///
/// let app = AppBuilder::new()
///     .settings(BoardSettings::default())
///     .build()?;
/// assert!(app.store().snapshot().is_empty());
/// # Ok::<(), projboard_core::app::BuildError>(())
/// ```
pub struct AppBuilder {
    settings: BoardSettings,
    store: Option<Arc<dyn ProjectStore>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            settings: BoardSettings::default(),
            store: None,
        }
    }

    pub fn settings(mut self, settings: BoardSettings) -> Self {
        self.settings = settings;
        self
    }

    /// 既存の store を使う（指定しなければ settings から作る）
    pub fn store(mut self, store: Arc<dyn ProjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        self.settings.validate()?;

        let store = match self.store {
            Some(store) => store,
            None => Arc::new(self.settings.build_store()),
        };

        let input = mount(ProjectInput::new(self.settings.form_rules()), &store);
        let active = mount(ProjectList::new(ProjectStatus::Active), &store);
        let finished = mount(ProjectList::new(ProjectStatus::Finished), &store);

        Ok(App {
            store,
            input,
            active,
            finished,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// App は 1 回の実行分のボード
///
/// store のライフタイムは App と同じ。
pub struct App {
    store: Arc<dyn ProjectStore>,
    pub input: ProjectInput,
    pub active: ProjectList,
    pub finished: ProjectList,
}

impl App {
    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        &self.store
    }

    pub fn list(&self, status: ProjectStatus) -> &ProjectList {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    /// Fill the form and submit it in one go.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        people: &str,
    ) -> Result<Project, ViewError> {
        self.input.set_title(title);
        self.input.set_description(description);
        self.input.set_people(people);
        self.input.submit()
    }

    /// Drag `id` onto the `status` column.
    pub fn move_to(&self, id: ProjectId, status: ProjectStatus) -> Result<Project, ViewError> {
        self.list(status).drop_project(id)
    }

    /// Both columns, active first.
    pub fn render(&self) -> String {
        format!("{}\n{}", self.active.render(), self.finished.render())
    }
}
