//! View - テキスト版の画面部品
//!
//! 共通の基底クラスは持たず、`View` trait + `mount()` の合成で組み立てます。
//!
//! # 部品
//! - **ProjectList**: 1 つの status の列。store を購読して自分の列だけを保持する
//! - **ProjectInput**: 追加フォーム。検証して `create_project` を呼ぶ

use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{
    BoardError, FormRules, Project, ProjectForm, ProjectId, ProjectStatus, Snapshot,
};
use crate::ports::ProjectStore;

/// ViewError は view 操作のエラー
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("view is not mounted on a store")]
    NotMounted,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// View は store に接続して文字列を描画する
pub trait View {
    /// store への接続（購読・ハンドルの保持）
    fn configure(&mut self, store: &Arc<dyn ProjectStore>);

    fn render(&self) -> String;
}

/// `configure` を済ませた view を返す
pub fn mount<V: View>(mut view: V, store: &Arc<dyn ProjectStore>) -> V {
    view.configure(store);
    view
}

/// What a column currently shows, and from which store revision.
#[derive(Debug, Default)]
struct Column {
    revision: u64,
    projects: Vec<Project>,
}

/// One column of the board.
pub struct ProjectList {
    status: ProjectStatus,
    assigned: Arc<Mutex<Column>>,
    store: Option<Arc<dyn ProjectStore>>,
}

impl ProjectList {
    pub fn new(status: ProjectStatus) -> Self {
        Self {
            status,
            assigned: Arc::default(),
            store: None,
        }
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Projects currently shown in this column, creation order.
    pub fn projects(&self) -> Vec<Project> {
        self.assigned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .projects
            .clone()
    }

    /// Drop a card onto this column.
    pub fn drop_project(&self, id: ProjectId) -> Result<Project, ViewError> {
        let store = self.store.as_ref().ok_or(ViewError::NotMounted)?;
        Ok(store.move_project(id, self.status)?)
    }

    fn header(&self) -> String {
        format!("{} PROJECTS", self.status().as_str().to_uppercase())
    }
}

/// Snapshots older than what the column already shows are ignored.
fn refresh(assigned: &Mutex<Column>, status: ProjectStatus, snapshot: &Snapshot) {
    let mut column = assigned.lock().unwrap_or_else(PoisonError::into_inner);
    if snapshot.revision < column.revision {
        return;
    }
    column.revision = snapshot.revision;
    column.projects = snapshot.with_status(status);
}

impl View for ProjectList {
    fn configure(&mut self, store: &Arc<dyn ProjectStore>) {
        let status = self.status;
        let assigned = Arc::clone(&self.assigned);
        store.subscribe(Box::new(move |snapshot: Snapshot| {
            refresh(&assigned, status, &snapshot)
        }));
        // 購読はリプレイしないので、現在の状態は自分で取り込む。
        // 読んだ後に別スレッドの変更が先に届いていれば、こちらは捨てられる
        refresh(&self.assigned, status, &store.snapshot());
        self.store = Some(Arc::clone(store));
    }

    fn render(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        let projects = self.projects();
        if projects.is_empty() {
            out.push_str("  (empty)\n");
        }
        for p in &projects {
            let _ = writeln!(out, "  - {} [{}]", p.title, p.id);
            let _ = writeln!(out, "    {}", p.people_label());
            let _ = writeln!(out, "    {}", p.description);
        }
        out
    }
}

/// The "add project" form.
pub struct ProjectInput {
    form: ProjectForm,
    rules: FormRules,
    store: Option<Arc<dyn ProjectStore>>,
}

impl ProjectInput {
    pub fn new(rules: FormRules) -> Self {
        Self {
            form: ProjectForm::default(),
            rules,
            store: None,
        }
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.form.title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.form.description = value.into();
    }

    pub fn set_people(&mut self, value: impl Into<String>) {
        self.form.people = value.into();
    }

    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    /// Validate, create the project, then clear the fields.
    ///
    /// On any error the fields keep what the user typed.
    pub fn submit(&mut self) -> Result<Project, ViewError> {
        let store = self.store.as_ref().ok_or(ViewError::NotMounted)?;
        let input = self.form.submit(&self.rules).map_err(BoardError::from)?;
        let project = store.create_project(input)?;
        self.form.clear();
        Ok(project)
    }
}

impl View for ProjectInput {
    fn configure(&mut self, store: &Arc<dyn ProjectStore>) {
        self.store = Some(Arc::clone(store));
    }

    fn render(&self) -> String {
        format!(
            "title: {}\ndescription: {}\npeople: {}\n",
            self.form.title, self.form.description, self.form.people
        )
    }
}
