use std::cell::RefCell;
use std::rc::Rc;

/// Cleanup guard. Clones share the same cleanup, which runs at most once.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// A guard with nothing to clean up.
    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }

    /// Ties this guard to `scope`: disposing the scope runs the cleanup.
    pub fn bind(self, scope: &crate::Scope) -> Self {
        let d = self.clone();
        scope.add_disposer(move || d.run());
        self
    }
}

/// Runs `f()` immediately and returns its `Dispose`, registered on `scope` when given.
pub fn effect<F>(scope: Option<&crate::Scope>, f: F) -> Dispose
where
    F: FnOnce() -> Dispose,
{
    let d = f();
    match scope {
        Some(scope) => d.bind(scope),
        None => d,
    }
}

/// Helper to register cleanup inside effect.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}
