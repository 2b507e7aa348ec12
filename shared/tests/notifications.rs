use crux_core::testing::AppTester;
use ride_feed::notify::{DEFAULT_DWELL_MS, DEFAULT_EXIT_MS};
use ride_feed::{App, Effect, Event, Model, Phase, Severity};

#[test]
fn community_toast_lives_for_dwell_then_disappears() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    app.update(Event::CommunityRequested, &mut model);
    let view = app.view(&model);
    assert_eq!(view.notifications.len(), 1);
    let toast = &view.notifications[0];
    assert_eq!(toast.message, "Community features coming soon!");
    assert_eq!(toast.severity, Severity::Info);
    assert_eq!(toast.phase, Phase::Created);

    let update = app.update(Event::Tick { elapsed_ms: 150 }, &mut model);
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));
    assert_eq!(app.view(&model).notifications[0].phase, Phase::Visible);

    let update = app.update(Event::Tick { elapsed_ms: 16 }, &mut model);
    assert!(update.effects.is_empty());

    app.update(
        Event::Tick {
            elapsed_ms: DEFAULT_DWELL_MS + DEFAULT_EXIT_MS,
        },
        &mut model,
    );
    assert!(app.view(&model).notifications.is_empty());
}

#[test]
fn manual_dismiss_then_timer_is_harmless() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    app.update(Event::CommunityRequested, &mut model);
    let id = app.view(&model).notifications[0].id;

    let dismiss = app.view(&model).notifications[0].dismiss.clone();
    app.update(Event::from(dismiss), &mut model);
    assert_eq!(app.view(&model).toast(id).map(|t| t.phase), Some(Phase::Dismissing));

    app.update(Event::Tick { elapsed_ms: DEFAULT_EXIT_MS }, &mut model);
    assert!(app.view(&model).toast(id).is_none());

    let update = app.update(Event::NotificationDismissed { id }, &mut model);
    assert!(update.effects.is_empty());
    app.update(Event::Tick { elapsed_ms: DEFAULT_DWELL_MS }, &mut model);
    assert!(app.view(&model).notifications.is_empty());
}

#[test]
fn toasts_stack_independently() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    app.update(Event::CommunityRequested, &mut model);
    app.update(Event::Tick { elapsed_ms: 4000 }, &mut model);
    app.update(Event::CommunityRequested, &mut model);

    let ids: Vec<_> = app.view(&model).notifications.iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 2);

    app.update(Event::Tick { elapsed_ms: 1300 }, &mut model);
    let view = app.view(&model);
    assert!(view.toast(ids[0]).is_none());
    assert_eq!(view.toast(ids[1]).map(|t| t.phase), Some(Phase::Visible));
}
