use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::constants::{MovieId, UserId};
use crate::error::{CinefavError, Result};
use crate::favorites::pending::{Direction, PendingOperation};
use crate::favorites::set::FavoriteSet;
use crate::models::movie::movie_ids;
use crate::traits::remote::FavoritesRemote;

/// Settled toggle whose remote call succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub movie_id: MovieId,
    pub direction: Direction,
    /// Local membership of `movie_id` once the toggle confirmed.
    pub is_favorite: bool,
}

#[derive(Debug, Default)]
struct State {
    favorites: FavoriteSet,
    pending: BTreeMap<u64, PendingOperation>,
    next_seq: u64,
    detached: bool,
}

/// Favorites of one user, kept in step with a remote store through
/// optimistic toggles.
///
/// Cloning yields another handle to the same state. The controller is meant
/// for a single-threaded executor: every mutation of the set happens inside a
/// synchronous borrow and never across an `.await`.
pub struct FavoritesController<R> {
    user_id: UserId,
    remote: Rc<R>,
    state: Rc<RefCell<State>>,
}

impl<R> Clone for FavoritesController<R> {
    fn clone(&self) -> Self {
        Self {
            user_id: self.user_id,
            remote: Rc::clone(&self.remote),
            state: Rc::clone(&self.state),
        }
    }
}

impl<R: FavoritesRemote + 'static> FavoritesController<R> {
    /// Create a controller with an empty favorites set.
    pub fn new(user_id: UserId, remote: R) -> Self {
        Self {
            user_id,
            remote: Rc::new(remote),
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Copy of the current (possibly optimistic) favorites.
    pub fn favorites(&self) -> FavoriteSet {
        self.state.borrow().favorites.clone()
    }

    pub fn is_favorite(&self, movie_id: MovieId) -> bool {
        self.state.borrow().favorites.contains(movie_id)
    }

    /// True while at least one toggle awaits its remote call.
    pub fn is_toggling(&self) -> bool {
        !self.state.borrow().pending.is_empty()
    }

    /// In-flight toggles in dispatch order.
    pub fn pending(&self) -> Vec<PendingOperation> {
        self.state.borrow().pending.values().cloned().collect()
    }

    pub fn is_detached(&self) -> bool {
        self.state.borrow().detached
    }

    /// Replace the local set with the authoritative remote list.
    pub fn sync<I>(&self, ids: I)
    where
        I: IntoIterator<Item = MovieId>,
    {
        let mut state = self.state.borrow_mut();
        if state.detached {
            debug!(user_id = self.user_id, "sync ignored on detached controller");
            return;
        }
        state.favorites.replace(ids);
        debug!(user_id = self.user_id, count = state.favorites.len(), "favorites synced");
    }

    /// Fetch the user's favorites from the remote and sync to them.
    ///
    /// On failure the local set is left untouched. Returns the number of
    /// favorites after the sync.
    pub async fn load(&self) -> Result<usize> {
        let movies = self.remote.list(self.user_id).await?;
        if self.is_detached() {
            return Err(CinefavError::Detached);
        }
        self.sync(movie_ids(&movies));
        let count = self.state.borrow().favorites.len();
        info!(user_id = self.user_id, count, "favorites loaded");
        Ok(count)
    }

    /// Flip `movie_id` locally right away, then confirm it remotely.
    ///
    /// The optimistic change is applied before this function returns; the
    /// returned future performs the remote call. A successful call writes the
    /// confirmed membership back; a failed one restores the id's membership
    /// from before the toggle and returns the error. Toggles of the same id
    /// are not serialized: whichever call settles last decides the local
    /// state. Dropping the future before it settles rolls the flip back.
    pub fn toggle(&self, movie_id: MovieId) -> impl Future<Output = Result<ToggleOutcome>> + 'static {
        let begun = self.begin(movie_id).map(|(seq, direction)| {
            let guard = InFlight {
                state: Rc::clone(&self.state),
                user_id: self.user_id,
                seq,
            };
            (guard, direction)
        });
        let remote = Rc::clone(&self.remote);
        let user_id = self.user_id;

        async move {
            let (guard, direction) = begun?;
            let result = match direction {
                Direction::Add => remote.add(user_id, movie_id).await,
                Direction::Remove => remote.remove(user_id, movie_id).await,
            };
            guard.settle(result)
        }
    }

    /// Stop applying results of in-flight operations. Used on teardown.
    pub fn detach(&self) {
        let mut state = self.state.borrow_mut();
        state.detached = true;
        let dropped = std::mem::take(&mut state.pending).len();
        debug!(user_id = self.user_id, dropped, "favorites controller detached");
    }

    fn begin(&self, movie_id: MovieId) -> Result<(u64, Direction)> {
        let mut state = self.state.borrow_mut();
        if state.detached {
            return Err(CinefavError::Detached);
        }

        let op = PendingOperation::new(movie_id, state.favorites.clone());
        let direction = op.direction;
        state.favorites.flip(movie_id);

        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.insert(seq, op);

        debug!(user_id = self.user_id, movie_id, %direction, seq, "optimistic toggle applied");
        Ok((seq, direction))
    }
}

/// Ties one pending operation to the future driving it.
///
/// Settling removes the operation; if the future is dropped first, the
/// operation is removed and rolled back on drop.
struct InFlight {
    state: Rc<RefCell<State>>,
    user_id: UserId,
    seq: u64,
}

impl InFlight {
    fn settle(self, result: Result<()>) -> Result<ToggleOutcome> {
        let user_id = self.user_id;
        let mut state = self.state.borrow_mut();
        let Some(op) = state.pending.remove(&self.seq) else {
            // Detached while the call was in flight.
            return Err(CinefavError::Detached);
        };

        match result {
            Ok(()) => {
                let is_favorite = op.direction == Direction::Add;
                state.favorites.set_membership(op.movie_id, is_favorite);
                debug!(user_id, movie_id = op.movie_id, direction = %op.direction, "toggle confirmed");
                Ok(ToggleOutcome {
                    movie_id: op.movie_id,
                    direction: op.direction,
                    is_favorite,
                })
            }
            Err(e) => {
                op.rollback(&mut state.favorites);
                warn!(
                    user_id,
                    movie_id = op.movie_id,
                    direction = %op.direction,
                    error = %e,
                    "toggle failed, rolled back"
                );
                Err(e)
            }
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        if let Some(op) = state.pending.remove(&self.seq) {
            op.rollback(&mut state.favorites);
            debug!(
                user_id = self.user_id,
                movie_id = op.movie_id,
                seq = self.seq,
                "toggle dropped before settling, rolled back"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool, LocalSpawner};
    use futures::task::LocalSpawnExt;

    use crate::models::Movie;

    type Reply = oneshot::Sender<Result<()>>;

    /// Remote whose add/remove calls stay pending until the test answers them.
    #[derive(Default)]
    struct ScriptedRemote {
        list: RefCell<Vec<Movie>>,
        list_error: RefCell<Option<CinefavError>>,
        calls: RefCell<Vec<(Direction, MovieId)>>,
        replies: RefCell<VecDeque<Option<Reply>>>,
    }

    impl ScriptedRemote {
        fn with_list(ids: &[MovieId]) -> Rc<Self> {
            let remote = Self::default();
            *remote.list.borrow_mut() = ids.iter().map(|&id| movie(id)).collect();
            Rc::new(remote)
        }

        /// Answer the `index`-th dispatched call.
        fn reply(&self, index: usize, result: Result<()>) {
            let sender = self.replies.borrow_mut()[index]
                .take()
                .expect("call already answered");
            sender.send(result).expect("toggle future dropped");
        }

        async fn dispatch(&self, direction: Direction, movie_id: MovieId) -> Result<()> {
            let (tx, rx) = oneshot::channel();
            self.calls.borrow_mut().push((direction, movie_id));
            self.replies.borrow_mut().push_back(Some(tx));
            rx.await
                .unwrap_or_else(|_| Err(CinefavError::Transport("reply dropped".to_string())))
        }
    }

    #[async_trait(?Send)]
    impl FavoritesRemote for ScriptedRemote {
        async fn list(&self, _user_id: UserId) -> Result<Vec<Movie>> {
            if let Some(err) = self.list_error.borrow().clone() {
                return Err(err);
            }
            Ok(self.list.borrow().clone())
        }

        async fn add(&self, _user_id: UserId, movie_id: MovieId) -> Result<()> {
            self.dispatch(Direction::Add, movie_id).await
        }

        async fn remove(&self, _user_id: UserId, movie_id: MovieId) -> Result<()> {
            self.dispatch(Direction::Remove, movie_id).await
        }
    }

    fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("movie {id}"),
            director: "someone".to_string(),
            genre: "drama".to_string(),
            duration: 100,
            year: 1999,
            rating: "PG".to_string(),
            synopsis: String::new(),
            created_at: String::new(),
            image_url: None,
        }
    }

    fn network_error() -> CinefavError {
        CinefavError::Transport("connection reset".to_string())
    }

    type Slot = Rc<RefCell<Option<Result<ToggleOutcome>>>>;

    fn spawn_toggle(
        spawner: &LocalSpawner,
        controller: &FavoritesController<Rc<ScriptedRemote>>,
        movie_id: MovieId,
    ) -> Slot {
        let slot: Slot = Rc::new(RefCell::new(None));
        let out = Rc::clone(&slot);
        let fut = controller.toggle(movie_id);
        spawner
            .spawn_local(async move {
                *out.borrow_mut() = Some(fut.await);
            })
            .unwrap();
        slot
    }

    fn ids(controller: &FavoritesController<Rc<ScriptedRemote>>) -> Vec<MovieId> {
        controller.favorites().iter().collect()
    }

    #[test]
    fn test_sync_is_idempotent() {
        let controller = FavoritesController::new(1, ScriptedRemote::with_list(&[]));
        controller.sync([1, 2, 3]);
        controller.sync([1, 2, 3]);
        assert_eq!(ids(&controller), vec![1, 2, 3]);
    }

    #[test]
    fn test_sync_replaces_previous_contents() {
        let controller = FavoritesController::new(1, ScriptedRemote::with_list(&[]));
        controller.sync([1, 2]);
        controller.sync([8]);
        assert_eq!(ids(&controller), vec![8]);
    }

    #[test]
    fn test_load_syncs_from_remote() {
        let controller = FavoritesController::new(1, ScriptedRemote::with_list(&[4, 2]));
        let count = block_on(controller.load()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(ids(&controller), vec![2, 4]);
    }

    #[test]
    fn test_load_failure_leaves_set_untouched() {
        let remote = ScriptedRemote::with_list(&[9]);
        *remote.list_error.borrow_mut() = Some(network_error());
        let controller = FavoritesController::new(1, Rc::clone(&remote));
        controller.sync([1]);

        let err = block_on(controller.load()).unwrap_err();
        assert_eq!(err, network_error());
        assert_eq!(ids(&controller), vec![1]);
    }

    #[test]
    fn test_toggle_applies_before_remote_resolves() {
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));

        let fut = controller.toggle(5);
        // Not polled yet: the optimistic change is already visible.
        assert_eq!(ids(&controller), vec![5]);
        assert!(controller.is_toggling());

        let mut pool = LocalPool::new();
        let slot: Slot = Rc::new(RefCell::new(None));
        let out = Rc::clone(&slot);
        pool.spawner()
            .spawn_local(async move { *out.borrow_mut() = Some(fut.await) })
            .unwrap();
        pool.run_until_stalled();

        assert_eq!(*remote.calls.borrow(), vec![(Direction::Add, 5)]);
        assert!(slot.borrow().is_none());

        remote.reply(0, Ok(()));
        pool.run_until_stalled();

        let outcome = slot.borrow_mut().take().unwrap().unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome { movie_id: 5, direction: Direction::Add, is_favorite: true }
        );
        assert!(!controller.is_toggling());
        assert_eq!(ids(&controller), vec![5]);
    }

    #[test]
    fn test_failed_remove_rolls_back_and_surfaces_error() {
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));
        controller.sync([5]);

        let mut pool = LocalPool::new();
        let slot = spawn_toggle(&pool.spawner(), &controller, 5);
        pool.run_until_stalled();
        assert!(ids(&controller).is_empty());
        assert_eq!(*remote.calls.borrow(), vec![(Direction::Remove, 5)]);

        remote.reply(0, Err(network_error()));
        pool.run_until_stalled();

        assert_eq!(slot.borrow_mut().take().unwrap(), Err(network_error()));
        assert_eq!(ids(&controller), vec![5]);
        assert!(controller.pending().is_empty());
    }

    #[test]
    fn test_concurrent_toggles_are_independent_in_any_order() {
        for order in [[0, 1], [1, 0]] {
            let remote = ScriptedRemote::with_list(&[]);
            let controller = FavoritesController::new(1, Rc::clone(&remote));
            let mut pool = LocalPool::new();
            let spawner = pool.spawner();

            let first = spawn_toggle(&spawner, &controller, 1);
            let second = spawn_toggle(&spawner, &controller, 2);
            pool.run_until_stalled();
            assert_eq!(controller.pending().len(), 2);

            for index in order {
                remote.reply(index, Ok(()));
                pool.run_until_stalled();
            }

            assert!(first.borrow().as_ref().unwrap().is_ok());
            assert!(second.borrow().as_ref().unwrap().is_ok());
            assert_eq!(ids(&controller), vec![1, 2]);
            assert!(!controller.is_toggling());
        }
    }

    #[test]
    fn test_rollback_does_not_clobber_other_in_flight_toggle() {
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let first = spawn_toggle(&spawner, &controller, 1);
        let second = spawn_toggle(&spawner, &controller, 2);
        pool.run_until_stalled();

        remote.reply(0, Err(network_error()));
        pool.run_until_stalled();
        // 2 is still optimistically present while its call is in flight.
        assert_eq!(ids(&controller), vec![2]);
        assert!(controller.is_toggling());

        remote.reply(1, Ok(()));
        pool.run_until_stalled();

        assert!(first.borrow().as_ref().unwrap().is_err());
        assert!(second.borrow().as_ref().unwrap().is_ok());
        assert_eq!(ids(&controller), vec![2]);
    }

    #[test]
    fn test_confirmed_toggle_leaves_no_residue_for_sync() {
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));
        let mut pool = LocalPool::new();

        let slot = spawn_toggle(&pool.spawner(), &controller, 7);
        pool.run_until_stalled();
        remote.reply(0, Ok(()));
        pool.run_until_stalled();
        assert!(slot.borrow().as_ref().unwrap().is_ok());
        assert!(controller.pending().is_empty());

        controller.sync([1]);
        assert_eq!(ids(&controller), vec![1]);
    }

    #[test]
    fn test_same_id_race_last_settled_response_wins() {
        // add(3) answered last with a failure: 3 goes back to absent.
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let add = spawn_toggle(&spawner, &controller, 3);
        let remove = spawn_toggle(&spawner, &controller, 3);
        pool.run_until_stalled();
        assert_eq!(
            *remote.calls.borrow(),
            vec![(Direction::Add, 3), (Direction::Remove, 3)]
        );
        assert!(ids(&controller).is_empty());

        remote.reply(1, Ok(()));
        pool.run_until_stalled();
        remote.reply(0, Err(network_error()));
        pool.run_until_stalled();

        assert!(remove.borrow().as_ref().unwrap().is_ok());
        assert!(add.borrow().as_ref().unwrap().is_err());
        assert!(!controller.is_favorite(3));

        // remove(3) answered last with a failure: 3 comes back.
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let add = spawn_toggle(&spawner, &controller, 3);
        let remove = spawn_toggle(&spawner, &controller, 3);
        pool.run_until_stalled();

        remote.reply(0, Ok(()));
        pool.run_until_stalled();
        remote.reply(1, Err(network_error()));
        pool.run_until_stalled();

        let confirmed = add.borrow_mut().take().unwrap().unwrap();
        assert!(confirmed.is_favorite);
        assert!(remove.borrow().as_ref().unwrap().is_err());
        assert!(controller.is_favorite(3));
    }

    #[test]
    fn test_same_id_race_both_confirmed_follows_last_response() {
        // (index answered last, expected membership of 3)
        for (last, expected) in [(0, false), (1, true)] {
            let remote = ScriptedRemote::with_list(&[]);
            let controller = FavoritesController::new(1, Rc::clone(&remote));
            controller.sync([3]);
            let mut pool = LocalPool::new();
            let spawner = pool.spawner();

            let remove = spawn_toggle(&spawner, &controller, 3);
            let add = spawn_toggle(&spawner, &controller, 3);
            pool.run_until_stalled();
            assert_eq!(
                *remote.calls.borrow(),
                vec![(Direction::Remove, 3), (Direction::Add, 3)]
            );

            remote.reply(1 - last, Ok(()));
            pool.run_until_stalled();
            remote.reply(last, Ok(()));
            pool.run_until_stalled();

            assert!(!remove.borrow_mut().take().unwrap().unwrap().is_favorite);
            assert!(add.borrow_mut().take().unwrap().unwrap().is_favorite);
            assert_eq!(controller.is_favorite(3), expected);
            assert!(!controller.is_toggling());
        }
    }

    #[test]
    fn test_dropped_toggle_rolls_back() {
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));

        drop(controller.toggle(4));
        assert!(!controller.is_toggling());
        assert!(controller.pending().is_empty());
        assert!(ids(&controller).is_empty());
        assert!(remote.calls.borrow().is_empty());
    }

    #[test]
    fn test_toggle_dropped_mid_flight_rolls_back() {
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));
        controller.sync([2]);
        let mut pool = LocalPool::new();

        let _slot = spawn_toggle(&pool.spawner(), &controller, 2);
        let other = spawn_toggle(&pool.spawner(), &controller, 6);
        pool.run_until_stalled();
        assert_eq!(ids(&controller), vec![6]);

        remote.reply(1, Ok(()));
        pool.run_until_stalled();
        assert!(other.borrow().as_ref().unwrap().is_ok());

        // Dropping the executor drops the remove(2) future still awaiting its reply.
        drop(pool);
        assert!(!controller.is_toggling());
        assert_eq!(ids(&controller), vec![2, 6]);
    }

    #[test]
    fn test_detach_discards_in_flight_results() {
        let remote = ScriptedRemote::with_list(&[]);
        let controller = FavoritesController::new(1, Rc::clone(&remote));
        let mut pool = LocalPool::new();

        let slot = spawn_toggle(&pool.spawner(), &controller, 5);
        pool.run_until_stalled();
        controller.detach();
        assert!(!controller.is_toggling());

        remote.reply(0, Err(network_error()));
        pool.run_until_stalled();

        assert_eq!(slot.borrow_mut().take().unwrap(), Err(CinefavError::Detached));
        // No rollback on released state.
        assert_eq!(ids(&controller), vec![5]);

        controller.sync([1, 2]);
        assert_eq!(ids(&controller), vec![5]);
        assert_eq!(block_on(controller.toggle(9)), Err(CinefavError::Detached));
        assert_eq!(block_on(controller.load()), Err(CinefavError::Detached));
        assert!(!controller.is_favorite(9));
    }
}
