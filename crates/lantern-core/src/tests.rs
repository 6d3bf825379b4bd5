#[cfg(test)]
mod tests {
    use crate::clock::*;
    use crate::effects::*;
    use crate::scope::*;
    use crate::signal::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use web_time::{Duration, Instant};

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
        assert_eq!(sig.with(|v| *v * 2), 202);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(42);
        sig.update(|v| *v += 1);
        assert_eq!(*seen.borrow(), vec![42, 43]);
    }

    #[test]
    fn test_set_if_changed_skips_equal_values() {
        let sig = signal("home".to_string());
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        sig.subscribe(move |_| c.set(c.get() + 1));

        assert!(!sig.set_if_changed("home".to_string()));
        assert!(sig.set_if_changed("myPage".to_string()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let sig = signal(0);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let id = sig.subscribe(move |_| c.set(c.get() + 1));
        sig.set(1);
        sig.unsubscribe(id);
        sig.unsubscribe(id);
        sig.set(2);
        assert_eq!(calls.get(), 1);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_write_back() {
        let sig = signal(0);
        let handle = sig.clone();
        sig.subscribe(move |v| {
            if *v < 3 {
                handle.set(*v + 1);
            }
        });
        sig.set(1);
        assert_eq!(sig.get(), 3);
    }

    #[test]
    fn test_nested_write_supersedes_outer_delivery() {
        let sig = signal("quiz");
        let handle = sig.clone();
        sig.subscribe(move |v| {
            if *v == "quiz" {
                handle.set("home");
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        sig.subscribe(move |v| s.borrow_mut().push(*v));

        sig.set("quiz");
        assert_eq!(sig.get(), "home");
        assert_eq!(*seen.borrow(), vec!["home"]);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(0));

        let scope = Scope::new();
        let c = cleaned_up.clone();
        scope.add_disposer(move || c.set(c.get() + 1));

        assert_eq!(cleaned_up.get(), 0);
        assert_eq!(scope.disposer_count(), 1);
        scope.dispose();
        assert_eq!(scope.disposer_count(), 0);
        scope.dispose();
        assert_eq!(cleaned_up.get(), 1);
        assert!(scope.is_disposed());
    }

    #[test]
    fn test_scope_children_dispose_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let parent = Scope::new();
        let child = parent.child();

        let o = order.clone();
        parent.add_disposer(move || o.borrow_mut().push("parent"));
        let o = order.clone();
        child.add_disposer(move || o.borrow_mut().push("child"));

        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
        assert!(child.is_disposed());
    }

    #[test]
    fn test_disposer_on_dead_scope_runs_immediately() {
        let scope = Scope::new();
        scope.dispose();
        let ran = Rc::new(Cell::new(false));
        let r = ran.clone();
        scope.add_disposer(move || r.set(true));
        assert!(ran.get());
    }

    #[test]
    fn test_dispose_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let d = Dispose::new(move || c.set(c.get() + 1));
        let d2 = d.clone();
        d.run();
        d2.run();
        assert_eq!(calls.get(), 1);
        assert!(d2.is_spent());
        assert!(Dispose::noop().is_spent());
    }

    #[test]
    fn test_effect_binds_to_scope() {
        let released = Rc::new(Cell::new(false));
        let scope = Scope::new();
        let r = released.clone();
        let d = effect(Some(&scope), move || on_unmount(move || r.set(true)));
        assert!(!d.is_spent());
        scope.dispose();
        assert!(released.get());
        assert!(d.is_spent());
    }

    #[test]
    fn test_manual_clock() {
        let t0 = Instant::now();
        let clock = ManualClock::new(t0);
        let shared = clock.clone();
        shared.advance(Duration::from_secs(90));
        assert_eq!(clock.now(), t0 + Duration::from_secs(90));
        clock.set(t0);
        assert_eq!(shared.now(), t0);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = system_clock();
        let a = clock.now();
        assert!(clock.now() >= a);
    }
}
