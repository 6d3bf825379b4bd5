use std::cell::Cell;
use std::rc::Rc;

use lantern_core::{Duration, ManualClock, Scope, on_unmount};
use lantern_navigation::*;

fn show(nav: &Navigator, what: &str) {
    let layers: Vec<&str> = nav.layer_stack().iter().map(|l| l.as_str()).collect();
    println!(
        "{what:<32} route={:<28} tab={:<10?} layers=[{}]",
        nav.route().to_string(),
        nav.tab(),
        layers.join(", ")
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = NavConfig::from_json(
        std::env::args()
            .nth(1)
            .as_deref()
            .unwrap_or(r#"{"retentionTimeoutSecs": 120}"#),
    )?;
    let clock = ManualClock::default();
    let nav = Navigator::new(&config, Rc::new(clock.clone()))?;

    let exits = Rc::new(Cell::new(0u32));
    let e = exits.clone();
    nav.set_exit_handler(move || {
        e.set(e.get() + 1);
        println!("  (exit confirmation shown)");
    });

    let shell = Scope::new();
    let dispatcher = BackDispatcher::new();
    let _back = nav.install_back_handler(&dispatcher, Some(&shell));

    show(&nav, "start");

    nav.go_my_page();
    nav.request_route(Route::NotificationSettings)?;
    show(&nav, "notification settings");
    dispatcher.dispatch();
    show(&nav, "back");

    nav.go_follow_list(FollowMode::Following);
    nav.open_detail("p42", DetailSource::FollowList, DetailContext::default())?;
    show(&nav, "detail from follow list");
    dispatcher.dispatch();
    show(&nav, "back");

    nav.go_user_profile("moth")?;
    nav.set_profile_section(ProfileSection::Replies);
    nav.open_detail("r7", DetailSource::UserProfileReplies, DetailContext::default())?;
    show(&nav, "detail from profile replies");
    for _ in 0..3 {
        let outcome = dispatcher.dispatch();
        show(&nav, &format!("back ({})", describe(&outcome)));
    }

    let released = Rc::new(Cell::new(false));
    nav.go_ranking();
    if let Some(scope) = nav.screen_scope(Layer::Ranking) {
        let r = released.clone();
        let _sub = on_unmount(move || r.set(true)).bind(&scope);
    }
    nav.go_home();
    clock.advance(config.retention_timeout() - Duration::from_secs(1));
    println!("ranking evicted early: {:?}", nav.poll_retention());
    clock.advance(Duration::from_secs(1));
    println!(
        "ranking evicted on time: {:?} (subscriptions released: {})",
        nav.poll_retention(),
        released.get()
    );

    let snapshot = nav.snapshot_json()?;
    log::info!("snapshot: {snapshot}");

    dispatcher.dispatch();
    println!("exit requests: {}", exits.get());

    shell.dispose();
    println!("after shell disposed: {}", describe(&dispatcher.dispatch()));
    nav.teardown();
    Ok(())
}

fn describe(outcome: &BackOutcome) -> String {
    match outcome {
        BackOutcome::Navigated { from, to, step } => format!("{from} -> {to} via {step:?}"),
        BackOutcome::SectionReset { nickname } => format!("{nickname}: section reset"),
        BackOutcome::ExitRequested => "exit requested".into(),
        BackOutcome::Unhandled => "unhandled".into(),
    }
}
