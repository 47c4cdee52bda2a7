use std::time::Duration;

use market_wizard::action::Action;
use market_wizard::core::r#loop::{Outcome, WizardLoop};
use market_wizard::core::state::{MountOptions, WizardPhase};
use market_wizard::domain::draft::{FieldEdit, MarketType, TypePayload};
use market_wizard::domain::steps::StepId;
use market_wizard::domain::validation::Strictness;
use market_wizard::services::confirm::ScriptedConfirmer;
use market_wizard::services::navigation::HistoryNavigator;
use market_wizard::services::notify::{NotificationKind, RecordingNotifier};
use pretty_assertions::assert_eq;

type TestWizard = WizardLoop<RecordingNotifier, HistoryNavigator, ScriptedConfirmer>;

fn mount(opts: MountOptions) -> TestWizard {
    WizardLoop::new(
        opts,
        RecordingNotifier::default(),
        HistoryNavigator::new("/create"),
        ScriptedConfirmer::new(Vec::new()),
    )
}

fn edit(e: FieldEdit) -> Action {
    Action::Edit(e)
}

fn poll_script(with_group: bool) -> Vec<Action> {
    let mut script = Vec::new();
    if with_group {
        script.push(edit(FieldEdit::GroupName("Trail Crew".into())));
        script.push(Action::Advance);
    }
    script.extend([
        edit(FieldEdit::MarketType(MarketType::Poll)),
        Action::Advance,
        edit(FieldEdit::Title("Best Route".into())),
        edit(FieldEdit::BuyIn("500".into())),
        Action::Advance,
        edit(FieldEdit::SetEntry {
            index: 0,
            text: "North ridge".into(),
        }),
        edit(FieldEdit::SetEntry {
            index: 1,
            text: "Lake loop".into(),
        }),
        Action::Advance,
    ]);
    script
}

#[tokio::test(start_paused = true)]
async fn group_poll_flow_redirects_to_new_market() {
    let mut w = mount(MountOptions::default().with_group(true));
    let mut script = poll_script(true);
    script.push(Action::Advance);

    let outcome = w.run(script, Duration::from_secs(10)).await.unwrap();

    let Outcome::Done { redirect } = outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    assert!(redirect.starts_with("/groups/"), "{redirect}");
    assert!(redirect.contains("?market="), "{redirect}");
    assert_eq!(w.navigator().current(), Some(redirect.as_str()));
    assert_eq!(
        w.notifier().kinds(),
        vec![NotificationKind::Loading, NotificationKind::Success]
    );
    assert_eq!(
        w.state().draft.payload,
        TypePayload::Poll {
            options: vec!["North ridge".into(), "Lake loop".into()]
        }
    );
}

#[tokio::test(start_paused = true)]
async fn market_only_flow_redirects_to_market_page() {
    let mut w = mount(MountOptions::default());
    let mut script = poll_script(false);
    script.push(Action::Submit);

    let outcome = w.run(script, Duration::from_secs(10)).await.unwrap();
    match outcome {
        Outcome::Done { redirect } => {
            assert!(redirect.starts_with("/markets/"), "{redirect}");
            assert!(!redirect.contains('?'));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn empty_group_name_blocks_first_step() {
    let mut w = mount(MountOptions::default().with_group(true));
    w.dispatch(Action::Advance);

    assert_eq!(w.state().sequencer.position(), 0);
    assert_eq!(w.state().current_step().id, StepId::GroupInfo);
    assert_eq!(w.notifier().count(NotificationKind::Error), 1);
}

#[tokio::test(start_paused = true)]
async fn double_submit_navigates_once() {
    let mut w = mount(MountOptions::default());
    let mut script = poll_script(false);
    script.push(Action::Advance);
    script.push(Action::Advance);
    script.push(Action::Submit);

    w.run(script, Duration::from_secs(10)).await.unwrap();

    // origin plus exactly one redirect
    assert_eq!(w.navigator().history().len(), 2);
    assert_eq!(w.notifier().count(NotificationKind::Success), 1);
    assert_eq!(w.notifier().count(NotificationKind::Loading), 1);
}

#[tokio::test(start_paused = true)]
async fn unmount_during_submission_drops_result() {
    let mut w = mount(MountOptions::default());
    for action in poll_script(false) {
        w.dispatch(action);
    }
    w.dispatch(Action::Advance);
    assert!(matches!(w.state().phase, WizardPhase::Submitting { .. }));

    w.dispatch(Action::Unmount);
    tokio::time::sleep(Duration::from_secs(5)).await;
    w.pump();

    assert_eq!(w.outcome(), Outcome::Unmounted);
    assert_eq!(w.navigator().history().to_vec(), vec!["/create".to_string()]);
    assert!(w.state().redirect().is_none());
    assert_eq!(w.notifier().count(NotificationKind::Success), 0);
}

#[tokio::test(start_paused = true)]
async fn standalone_rules_require_description_and_buy_in() {
    let mut w = mount(MountOptions::default().strictness(Strictness::Standalone));
    w.dispatch(edit(FieldEdit::MarketType(MarketType::Betrayal)));
    w.dispatch(Action::Advance);
    w.dispatch(edit(FieldEdit::Title("Split or steal".into())));
    w.dispatch(Action::Advance);
    assert_eq!(w.state().current_step().id, StepId::BasicInfo);
    assert_eq!(
        w.notifier().last().map(|n| n.message.as_str()),
        Some("Please enter a description")
    );

    w.dispatch(edit(FieldEdit::Description("Classic dilemma".into())));
    w.dispatch(edit(FieldEdit::BuyIn("0".into())));
    w.dispatch(Action::Advance);
    assert_eq!(w.state().current_step().id, StepId::BasicInfo);

    w.dispatch(edit(FieldEdit::BuyIn("25".into())));
    w.dispatch(Action::Advance);
    assert_eq!(w.state().current_step().id, StepId::Configuration);
}

#[tokio::test(start_paused = true)]
async fn back_and_jump_keep_draft() {
    let mut w = mount(MountOptions::default());
    for action in poll_script(false) {
        w.dispatch(action);
    }
    assert_eq!(w.state().current_step().id, StepId::Review);

    w.dispatch(Action::JumpTo(StepId::MarketType));
    assert_eq!(w.state().current_step().id, StepId::MarketType);
    assert_eq!(w.state().draft.title, "Best Route");

    w.dispatch(Action::JumpTo(StepId::Review));
    assert_eq!(w.state().current_step().id, StepId::MarketType);

    w.dispatch(Action::Retreat);
    assert_eq!(w.state().current_step().id, StepId::MarketType);
}

#[tokio::test(start_paused = true)]
async fn cancel_dirty_draft_asks_before_leaving() {
    let mut w = WizardLoop::new(
        MountOptions::default(),
        RecordingNotifier::default(),
        HistoryNavigator::new("/home"),
        ScriptedConfirmer::new([false, true]),
    );
    w.sender().send(Action::Edit(FieldEdit::Title("draft".into()))).unwrap();
    w.pump();

    w.dispatch(Action::Cancel);
    assert_eq!(w.confirmer().asked.len(), 1);
    assert!(w.state().is_editing());

    w.dispatch(Action::Cancel);
    assert_eq!(w.confirmer().asked.len(), 2);
    assert_eq!(w.outcome(), Outcome::Discarded);
}

#[tokio::test(start_paused = true)]
async fn json_script_file_parses_and_completes() {
    let raw = include_str!("../scripts/poll_with_group.json");
    let script: Vec<Action> = serde_json::from_str(raw).unwrap();
    let mut w = mount(MountOptions::default().with_group(true));

    let outcome = w.run(script, Duration::from_secs(10)).await.unwrap();

    assert!(matches!(outcome, Outcome::Done { .. }), "{outcome:?}");
    w.shutdown().await.unwrap();
}
