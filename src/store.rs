//! Explicit state container with a notify-on-mutation contract.
//!
//! Every mutation goes through [`Store::update`], which bumps a revision
//! counter. Anything that needs to react (the render loop, tests) holds a
//! receiver from [`Store::subscribe`] and checks whether the revision moved.

use tokio::sync::watch;

pub type Revision = u64;

pub struct Store<T> {
    state: T,
    revision: watch::Sender<Revision>,
}

impl<T> Store<T> {
    pub fn new(state: T) -> Self {
        let (revision, _) = watch::channel(0);
        Self { state, revision }
    }

    /// Read access to the current state
    pub fn get(&self) -> &T {
        &self.state
    }

    /// Receive revision changes. A fresh receiver starts out up to date.
    pub fn subscribe(&self) -> watch::Receiver<Revision> {
        self.revision.subscribe()
    }

    /// Mutate the state and notify subscribers
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.state);
        self.emit();
        result
    }

    /// Notify subscribers without touching the state
    pub fn emit(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_notifies_subscribers() -> anyhow::Result<()> {
        let mut store = Store::new(Vec::<u32>::new());
        let mut rx = store.subscribe();
        assert!(!rx.has_changed()?);

        store.update(|v| v.push(7));

        assert!(rx.has_changed()?);
        assert_eq!(*rx.borrow_and_update(), 1);
        assert!(!rx.has_changed()?);
        assert_eq!(store.get(), &vec![7]);
        Ok(())
    }

    #[test]
    fn test_update_without_subscribers() {
        let mut store = Store::new(0i32);
        store.update(|n| *n += 2);
        store.update(|n| *n += 3);
        assert_eq!(*store.get(), 5);
        assert_eq!(*store.subscribe().borrow(), 2);
    }

    #[test]
    fn test_read_does_not_emit() -> anyhow::Result<()> {
        let store = Store::new(String::from("draft"));
        let rx = store.subscribe();
        assert_eq!(store.get(), "draft");
        assert!(!rx.has_changed()?);
        Ok(())
    }

    #[test]
    fn test_update_returns_closure_result() {
        let mut store = Store::<Vec<&str>>::default();
        let len = store.update(|v| {
            v.push("a");
            v.len()
        });
        assert_eq!(len, 1);
    }
}
