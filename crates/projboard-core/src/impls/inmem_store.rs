//! InMemoryProjectStore - プロセス内のボード
//!
//! # 実装詳細
//! - `state`: プロジェクト一覧（作成順）と revision
//! - `subscribers`: 登録順の subscriber。このロックが「変更 + 通知」のクリティカルセクションを兼ねる
//! - `pending`: `subscribe()` は常にここに積み、次の変更の先頭で `subscribers` に合流させる
//! - `notifying`: 通知中のスレッド。同じスレッドからの再入をエラーにするために使う
//!
//! ロック順序は `subscribers` → `state`。`snapshot()` / `get()` は `state` だけを取るので
//! subscriber の中から呼んでも詰まらない。

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use tracing::{debug, info, warn};

use crate::domain::{
    BoardError, BoardEvent, NewProject, Project, ProjectId, ProjectStatus, Snapshot,
};
use crate::ports::{IdGenerator, ProjectStore, Subscriber, SystemClock, UlidGenerator};

#[derive(Debug, Default)]
struct BoardState {
    projects: Vec<Project>,
    revision: u64,
}

impl BoardState {
    fn snapshot(&self, cause: Option<BoardEvent>) -> Snapshot {
        Snapshot::new(self.revision, cause, self.projects.clone())
    }
}

/// InMemoryProjectStore は `ProjectStore` のプロセス内実装
///
/// # 使用例
/// ```
/// use std::sync::Arc;
/// use projboard_core::domain::{NewProject, ProjectStatus, Snapshot};
/// use projboard_core::impls::InMemoryProjectStore;
/// use projboard_core::ports::ProjectStore;
///
/// let store = Arc::new(InMemoryProjectStore::new_ulid());
/// store.subscribe(Box::new(|snap: Snapshot| println!("{} projects", snap.len())));
///
/// let p = store.create_project(NewProject::new("Build API", "REST service", 3))?;
/// store.move_project(p.id, ProjectStatus::Finished)?;
/// # Ok::<(), projboard_core::domain::BoardError>(())
/// ```
pub struct InMemoryProjectStore {
    state: Mutex<BoardState>,
    subscribers: Mutex<Vec<Box<dyn Subscriber>>>,
    pending: Mutex<Vec<Box<dyn Subscriber>>>,
    notifying: Mutex<Option<ThreadId>>,
    id_gen: Box<dyn IdGenerator>,
}

impl InMemoryProjectStore {
    pub fn new(id_gen: impl IdGenerator + 'static) -> Self {
        Self {
            state: Mutex::new(BoardState::default()),
            subscribers: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            notifying: Mutex::new(None),
            id_gen: Box::new(id_gen),
        }
    }

    /// 単調増加 ULID + OS 時計
    pub fn new_ulid() -> Self {
        Self::new(UlidGenerator::new(SystemClock))
    }

    /// Apply one mutation, then notify every subscriber with the result.
    ///
    /// `apply` runs under the state lock. When it fails nothing changes and
    /// nobody is notified.
    fn commit<F>(&self, apply: F) -> Result<Project, BoardError>
    where
        F: FnOnce(&mut BoardState) -> Result<(Project, BoardEvent), BoardError>,
    {
        let current = thread::current().id();
        if *lock(&self.notifying) == Some(current) {
            warn!("rejected store mutation from inside a subscriber");
            return Err(BoardError::ReentrantMutation);
        }

        let mut subscribers = lock(&self.subscribers);

        let (project, event, snapshot) = {
            let mut state = lock(&self.state);
            let (project, event) = apply(&mut *state)?;
            state.revision += 1;
            (project, event, state.snapshot(Some(event)))
        };

        subscribers.append(&mut lock(&self.pending));

        let _notifying = NotifyingGuard::enter(&self.notifying, current);
        debug!(
            revision = snapshot.revision,
            project_id = %event.project_id(),
            subscribers = subscribers.len(),
            "notifying subscribers"
        );
        fan_out(&mut subscribers, snapshot);

        Ok(project)
    }
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new_ulid()
    }
}

impl ProjectStore for InMemoryProjectStore {
    fn subscribe(&self, subscriber: Box<dyn Subscriber>) {
        lock(&self.pending).push(subscriber);
    }

    fn create_project(&self, input: NewProject) -> Result<Project, BoardError> {
        let project = self.commit(|state| {
            let id = self.id_gen.generate_project_id()?;
            let project = Project::new(id, input);
            state.projects.push(project.clone());
            Ok((project, BoardEvent::ProjectCreated { id }))
        })?;

        info!(
            project_id = %project.id,
            title = %project.title,
            people = project.people,
            "project created"
        );
        Ok(project)
    }

    fn move_project(&self, id: ProjectId, status: ProjectStatus) -> Result<Project, BoardError> {
        let result = self.commit(|state| {
            let project = state
                .projects
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(BoardError::ProjectNotFound(id))?;

            let from = project.status;
            project.status = status;
            Ok((
                project.clone(),
                BoardEvent::ProjectMoved {
                    id,
                    from,
                    to: status,
                },
            ))
        });

        match &result {
            Ok(project) => info!(project_id = %id, status = %project.status, "project moved"),
            Err(BoardError::ProjectNotFound(_)) => warn!(project_id = %id, "move of unknown project"),
            Err(_) => {}
        }
        result
    }

    fn snapshot(&self) -> Snapshot {
        lock(&self.state).snapshot(None)
    }

    fn get(&self, id: ProjectId) -> Option<Project> {
        lock(&self.state)
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

/// The last subscriber takes the snapshot by value; the rest get clones.
fn fan_out(subscribers: &mut [Box<dyn Subscriber>], snapshot: Snapshot) {
    if let Some((last, rest)) = subscribers.split_last_mut() {
        for subscriber in rest {
            subscriber.notify(snapshot.clone());
        }
        last.notify(snapshot);
    }
}

/// A panicking subscriber must not wedge the store.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the current thread as notifying until dropped.
struct NotifyingGuard<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> NotifyingGuard<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>, thread: ThreadId) -> Self {
        *lock(slot) = Some(thread);
        Self { slot }
    }
}

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        *lock(self.slot) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SequentialIdGenerator;
    use std::collections::HashSet;
    use std::sync::{Arc, Weak};

    type Log = Arc<Mutex<Vec<Snapshot>>>;

    fn recorder() -> (Log, Box<dyn Subscriber>) {
        let log: Log = Arc::default();
        let sink = Arc::clone(&log);
        let subscriber: Box<dyn Subscriber> =
            Box::new(move |snap: Snapshot| sink.lock().unwrap().push(snap));
        (log, subscriber)
    }

    fn store() -> InMemoryProjectStore {
        InMemoryProjectStore::new(SequentialIdGenerator::new())
    }

    fn sample(title: &str) -> NewProject {
        NewProject::new(title, "desc", 2)
    }

    #[test]
    fn create_then_move_scenario() {
        let store = store();
        let (log, sub) = recorder();
        store.subscribe(sub);

        let created = store
            .create_project(NewProject::new("Build API", "REST service", 3))
            .unwrap();

        {
            let log = log.lock().unwrap();
            assert_eq!(log.len(), 1);
            assert_eq!(log[0].len(), 1);
            assert_eq!(log[0].projects()[0].status, ProjectStatus::Active);
        }

        store
            .move_project(created.id, ProjectStatus::Finished)
            .unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 2);
        let moved = &log[1].projects()[0];
        assert_eq!(moved.status, ProjectStatus::Finished);
        assert_eq!(moved.id, created.id);
        assert_eq!(moved.title, "Build API");
        assert_eq!(moved.description, "REST service");
        assert_eq!(moved.people, 3);
    }

    #[test]
    fn created_project_matches_input() {
        let store = store();
        let p = store.create_project(sample("a")).unwrap();

        assert_eq!(p.title, "a");
        assert_eq!(p.description, "desc");
        assert_eq!(p.people, 2);
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(store.get(p.id), Some(p));
    }

    #[test]
    fn ids_are_never_reused() {
        let store = InMemoryProjectStore::new_ulid();
        let ids: HashSet<_> = (0..200)
            .map(|i| store.create_project(sample(&i.to_string())).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn each_create_appends_exactly_one() {
        let store = store();
        let (log, sub) = recorder();
        store.subscribe(sub);

        let a = store.create_project(sample("a")).unwrap();
        let b = store.create_project(sample("b")).unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log[0].len(), 1);
        assert_eq!(log[1].len(), 2);
        assert_eq!(log[0].last(), Some(&a));
        assert_eq!(log[1].last(), Some(&b));
        assert_eq!(log[1].revision, 2);
        assert_eq!(log[1].cause, Some(BoardEvent::ProjectCreated { id: b.id }));
    }

    #[test]
    fn move_leaves_other_projects_untouched() {
        let store = store();
        let a = store.create_project(sample("a")).unwrap();
        let b = store.create_project(sample("b")).unwrap();
        let c = store.create_project(sample("c")).unwrap();

        let (log, sub) = recorder();
        store.subscribe(sub);
        store.move_project(b.id, ProjectStatus::Finished).unwrap();

        let log = log.lock().unwrap();
        let snap = &log[0];
        let expected_b = Project {
            status: ProjectStatus::Finished,
            ..b.clone()
        };
        assert_eq!(snap.projects().to_vec(), vec![a, expected_b, c]);
        assert_eq!(
            snap.cause,
            Some(BoardEvent::ProjectMoved {
                id: b.id,
                from: ProjectStatus::Active,
                to: ProjectStatus::Finished,
            })
        );
    }

    #[test]
    fn move_to_same_status_still_notifies() {
        let store = store();
        let a = store.create_project(sample("a")).unwrap();
        let (log, sub) = recorder();
        store.subscribe(sub);

        store.move_project(a.id, ProjectStatus::Active).unwrap();
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn move_unknown_id_errors_without_notification() {
        let store = store();
        store.create_project(sample("a")).unwrap();
        let before = store.snapshot();

        let (log, sub) = recorder();
        store.subscribe(sub);

        let unknown = ProjectId::from(ulid::Ulid::from(999u128));
        let err = store
            .move_project(unknown, ProjectStatus::Finished)
            .unwrap_err();

        assert!(matches!(err, BoardError::ProjectNotFound(id) if id == unknown));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn subscribers_do_not_get_replay() {
        let store = store();
        store.create_project(sample("a")).unwrap();

        let (log, sub) = recorder();
        store.subscribe(sub);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn subscribers_run_in_registration_order_and_see_same_snapshot() {
        let store = store();
        let order: Arc<Mutex<Vec<(u8, Snapshot)>>> = Arc::default();
        for tag in 0..3u8 {
            let order = Arc::clone(&order);
            store.subscribe(Box::new(move |snap: Snapshot| {
                order.lock().unwrap().push((tag, snap))
            }));
        }

        store.create_project(sample("a")).unwrap();

        let order = order.lock().unwrap();
        let tags: Vec<_> = order.iter().map(|(t, _)| *t).collect();
        assert_eq!(tags, vec![0, 1, 2]);
        assert_eq!(order[0].1, order[1].1);
        assert_eq!(order[1].1, order[2].1);
    }

    #[test]
    fn mutating_a_snapshot_does_not_touch_the_store() {
        let store = store();
        let a = store.create_project(sample("a")).unwrap();

        store.subscribe(Box::new(|mut snap: Snapshot| {
            snap.projects.clear();
            snap.projects.push(Project::new(
                ProjectId::from(ulid::Ulid::from(42u128)),
                NewProject::new("evil", "evil", 1),
            ));
        }));
        let (log, sub) = recorder();
        store.subscribe(sub);

        store.move_project(a.id, ProjectStatus::Finished).unwrap();

        // the second subscriber got an untouched copy
        assert_eq!(log.lock().unwrap()[0].len(), 1);
        let snap = store.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.projects()[0].id, a.id);
        assert_eq!(snap.projects()[0].status, ProjectStatus::Finished);
    }

    #[test]
    fn held_snapshot_does_not_see_later_mutations() {
        let store = store();
        let a = store.create_project(sample("a")).unwrap();
        let held = store.snapshot();

        store.move_project(a.id, ProjectStatus::Finished).unwrap();
        store.create_project(sample("b")).unwrap();

        assert_eq!(held.len(), 1);
        assert_eq!(held.projects()[0].status, ProjectStatus::Active);
    }

    #[test]
    fn subscribe_during_notification_joins_next_round() {
        let store = Arc::new(store());
        let (late_log, late_sub) = recorder();

        let weak: Weak<InMemoryProjectStore> = Arc::downgrade(&store);
        let mut late_sub = Some(late_sub);
        store.subscribe(Box::new(move |_snap: Snapshot| {
            if let (Some(sub), Some(store)) = (late_sub.take(), weak.upgrade()) {
                store.subscribe(sub);
            }
        }));

        store.create_project(sample("a")).unwrap();
        assert!(late_log.lock().unwrap().is_empty());

        store.create_project(sample("b")).unwrap();
        let late_log = late_log.lock().unwrap();
        assert_eq!(late_log.len(), 1);
        assert_eq!(late_log[0].len(), 2);
    }

    #[test]
    fn reentrant_mutation_is_rejected() {
        let store = Arc::new(store());
        let rejected = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&store);
        let seen = Arc::clone(&rejected);
        store.subscribe(Box::new(move |_snap: Snapshot| {
            if let Some(store) = weak.upgrade() {
                let result = store.create_project(NewProject::new("nested", "d", 1));
                *seen.lock().unwrap() =
                    Some(matches!(result, Err(BoardError::ReentrantMutation)));
            }
        }));

        store.create_project(sample("a")).unwrap();

        assert_eq!(*rejected.lock().unwrap(), Some(true));
        assert_eq!(store.snapshot().len(), 1);

        // the store is usable again after the round
        store.create_project(sample("b")).unwrap();
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn reads_are_allowed_inside_a_subscriber() {
        let store = Arc::new(store());
        let lens = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&store);
        let sink = Arc::clone(&lens);
        store.subscribe(Box::new(move |_snap: Snapshot| {
            if let Some(store) = weak.upgrade() {
                sink.lock().unwrap().push(store.snapshot().len());
            }
        }));

        store.create_project(sample("a")).unwrap();
        store.create_project(sample("b")).unwrap();
        assert_eq!(*lens.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn concurrent_mutations_are_serialized() {
        let store = Arc::new(InMemoryProjectStore::new_ulid());
        let (log, sub) = recorder();
        store.subscribe(sub);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        store
                            .create_project(sample(&format!("{t}-{i}")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 100);
        // revisions arrive in order and each snapshot is one longer than the last
        for (i, snap) in log.iter().enumerate() {
            assert_eq!(snap.revision, i as u64 + 1);
            assert_eq!(snap.len(), i + 1);
        }
    }
}
