//! Controller lifecycle contract, exercised through the public API with the
//! deterministic fake source.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use reveal_core::fake::FakeSource;
use reveal_core::{
    Presentation, RevealConfig, RevealController, RevealState, RevealTarget, RootMargin,
};

type Log = Rc<RefCell<Vec<Presentation>>>;

fn setup() -> (Rc<FakeSource<&'static str>>, RevealController<&'static str>) {
    let source = Rc::new(FakeSource::new());
    let controller = RevealController::from_shared(source.clone());
    (source, controller)
}

fn recorded(node: &'static str) -> (RevealTarget<&'static str>, Log) {
    let log: Log = Rc::default();
    let sink = log.clone();
    let target = RevealTarget::new(node).with_listener(move |p| sink.borrow_mut().push(p));
    (target, log)
}

fn repeat() -> RevealConfig {
    RevealConfig::default().with_once(false)
}

#[test]
fn release_twice_is_a_noop_and_stops_delivery() {
    let (source, controller) = setup();
    let (target, log) = recorded("card");
    let handle = controller.attach(&target, &repeat());
    let id = handle.subscription().expect("source accepted the subscription");

    controller.release(&handle);
    controller.release(&handle);
    handle.release();

    assert!(handle.is_released());
    assert!(!source.is_active(id));
    assert_eq!(source.released(), 1);
    assert_eq!(source.enter(&"card", 1.0), 0);
    assert!(log.borrow().is_empty());
    assert_eq!(target.state(), RevealState::Released { visible: false });
}

#[test]
fn once_target_latches_and_releases_on_first_reveal() {
    let (source, controller) = setup();
    let (target, log) = recorded("hero");
    let handle = controller.attach(&target, &RevealConfig::default());

    assert_eq!(source.leave(&"hero"), 1);
    assert_eq!(target.state(), RevealState::Hidden);

    assert_eq!(source.enter(&"hero", 0.4), 1);
    assert_eq!(target.state(), RevealState::Released { visible: true });
    assert!(!target.is_observed());
    assert_eq!(source.active(), 0);

    // Already unsubscribed: leaving and re-entering reach nobody.
    assert_eq!(source.leave(&"hero"), 0);
    assert_eq!(source.enter(&"hero", 1.0), 0);
    assert!(target.is_visible());
    assert_eq!(*log.borrow(), vec![Presentation::visible(Duration::ZERO)]);

    // Releasing after the latch already fired is still fine.
    handle.release();
    assert_eq!(source.released(), 1);
}

#[test]
fn repeat_target_toggles_without_limit() {
    let (source, controller) = setup();
    let (target, log) = recorded("feature");
    let _handle = controller.attach(&target, &repeat().with_delay_ms(120));

    for _ in 0..25 {
        source.enter(&"feature", 0.8);
        assert_eq!(target.state(), RevealState::Visible);
        source.leave(&"feature");
        assert_eq!(target.state(), RevealState::Hidden);
    }

    let log = log.borrow();
    assert_eq!(log.len(), 50);
    assert_eq!(log[0], Presentation::visible(Duration::from_millis(120)));
    assert_eq!(log[1], Presentation::HIDDEN);
    assert!(target.is_observed());
}

#[test]
fn delay_is_clamped_before_presentation() {
    let (source, controller) = setup();

    let (early, early_log) = recorded("early");
    controller.attach(&early, &RevealConfig::default().with_delay_ms(-50));
    let (late, late_log) = recorded("late");
    controller.attach(&late, &RevealConfig::default().with_delay_ms(300));

    source.enter(&"early", 1.0);
    source.enter(&"late", 1.0);

    assert_eq!(early_log.borrow()[0].delay, Duration::ZERO);
    assert_eq!(late_log.borrow()[0].delay, Duration::from_millis(300));
    assert_eq!(late_log.borrow()[0].style(""), "transition-delay: 300ms;");
}

#[test]
fn unmount_while_hidden_leaves_no_subscription() {
    let (source, controller) = setup();
    let (target, log) = recorded("footer");
    let handle = controller.attach(&target, &RevealConfig::default());
    let id = handle.subscription().expect("subscribed");

    target.unmount();

    assert!(!source.is_active(id));
    assert_eq!(source.active(), 0);
    assert_eq!(source.enter(&"footer", 1.0), 0);
    assert_eq!(source.delivered(), 0);
    assert!(log.borrow().is_empty());
    assert_eq!(target.state(), RevealState::Released { visible: false });

    // The handle still releases cleanly afterwards.
    handle.release();
    assert_eq!(source.released(), 1);
}

#[test]
fn unavailable_source_fails_open() {
    let source: Rc<FakeSource<&'static str>> = Rc::new(FakeSource::unavailable());
    let controller = RevealController::from_shared(source.clone());
    let (target, log) = recorded("cta");

    let handle = controller.attach(&target, &RevealConfig::default().with_delay_ms(250));

    assert_eq!(target.state(), RevealState::Visible);
    assert_eq!(handle.subscription(), None);
    assert_eq!(
        *log.borrow(),
        vec![Presentation::visible(Duration::from_millis(250))]
    );
    handle.release();
    target.unmount();
    assert_eq!(target.state(), RevealState::Released { visible: true });
}

#[test]
fn attach_after_unmount_is_ignored() {
    let (source, controller) = setup();
    let (target, log) = recorded("late-mount");
    target.unmount();

    let handle = controller.attach(&target, &RevealConfig::default());

    assert_eq!(handle.subscription(), None);
    assert_eq!(source.active(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn latched_target_cannot_be_reattached() {
    let (source, controller) = setup();
    let (target, _log) = recorded("stat");
    controller.attach(&target, &RevealConfig::default());
    source.enter(&"stat", 1.0);

    let again = controller.attach(&target, &repeat());
    assert_eq!(again.subscription(), None);
    assert_eq!(source.active(), 0);
    assert!(target.is_visible());
}

#[test]
fn releasing_one_target_leaves_others_observed() {
    let (source, controller) = setup();
    let (left, _) = recorded("left");
    let (right, _) = recorded("right");
    let left_handle = controller.attach(&left, &repeat());
    let _right_handle = controller.attach(&right, &repeat());

    left_handle.release();

    assert_eq!(source.active(), 1);
    assert_eq!(source.enter(&"right", 1.0), 1);
    assert!(right.is_visible());
    assert!(!left.is_visible());
}

#[test]
fn reattach_replaces_the_previous_subscription() {
    let (source, controller) = setup();
    let (target, _) = recorded("swap");
    let first = controller.attach(&target, &repeat());
    let second = controller.attach(&target, &repeat().with_threshold(0.5));

    assert_eq!(source.active(), 1);
    assert_ne!(first.subscription(), second.subscription());

    // The stale handle must not tear down the new binding.
    first.release();
    assert!(target.is_observed());
    assert_eq!(source.enter(&"swap", 0.3), 1);
    assert!(!target.is_visible());
    assert_eq!(source.enter(&"swap", 0.6), 1);
    assert!(target.is_visible());
}

#[test]
fn dropping_the_target_releases_its_subscription() {
    let (source, controller) = setup();
    let handle = {
        let (target, _) = recorded("ephemeral");
        controller.attach(&target, &RevealConfig::default())
    };

    assert_eq!(source.active(), 0);
    assert_eq!(source.enter(&"ephemeral", 1.0), 0);
    handle.release();
}

#[test]
fn observe_options_reach_the_source() {
    let (source, controller) = setup();
    let (target, _) = recorded("options");
    let margin: RootMargin = "10px 20%".parse().expect("valid margin");
    controller.attach(
        &target,
        &RevealConfig::default()
            .with_threshold(1.7)
            .with_root_margin(margin),
    );

    let options = source.options_for(&"options").expect("subscribed");
    assert_eq!(options.threshold, 1.0);
    assert_eq!(options.root_margin.to_string(), "10px 20% 10px 20%");
}

#[test]
fn listener_may_release_from_inside_a_callback() {
    let (source, controller) = setup();
    let slot: Rc<RefCell<Option<RevealTarget<&'static str>>>> = Rc::default();
    let inner_slot = slot.clone();

    let target = RevealTarget::new("nested").with_listener(move |p| {
        if p.visible {
            if let Some(target) = inner_slot.borrow().as_ref() {
                target.unmount();
            }
        }
    });
    *slot.borrow_mut() = Some(target.clone());
    controller.attach(&target, &repeat());

    assert_eq!(source.enter(&"nested", 1.0), 1);
    assert_eq!(target.state(), RevealState::Released { visible: true });
    assert_eq!(source.active(), 0);

    // Break the target <-> listener cycle.
    slot.borrow_mut().take();
}

#[test]
fn default_attach_uses_controller_defaults() {
    let (source, controller) = setup();
    let controller = controller
        .with_defaults(RevealConfig::default().with_threshold(0.5).with_once(false));
    let (target, _) = recorded("defaults");
    controller.attach_default(&target);

    source.enter(&"defaults", 0.4);
    assert!(!target.is_visible());
    source.enter(&"defaults", 0.5);
    assert_eq!(target.state(), RevealState::Visible);
    source.leave(&"defaults");
    assert_eq!(target.state(), RevealState::Hidden);
}
