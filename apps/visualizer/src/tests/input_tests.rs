use super::*;

use std::time::Duration;

use shared::domain::MagnitudeRange;
use sort_engine::{ControllerConfig, NullRenderer, MAX_SIZE};

#[test]
fn single_keys_map_to_shortcuts() {
    assert_eq!(parse_command("s"), Some(InputCommand::Start));
    assert_eq!(parse_command("G"), Some(InputCommand::Generate));
    assert_eq!(parse_command(" r "), Some(InputCommand::Reset));
    assert_eq!(parse_command("t"), Some(InputCommand::ToggleTheme));
    assert_eq!(parse_command("q"), Some(InputCommand::Quit));
}

#[test]
fn digit_keys_select_in_catalogue_order() {
    assert_eq!(
        parse_command("1"),
        Some(InputCommand::Select(Algorithm::Bubble))
    );
    assert_eq!(parse_command("6"), Some(InputCommand::Select(Algorithm::Heap)));
    assert_eq!(parse_command("0"), None);
    assert_eq!(parse_command("7"), None);
}

#[test]
fn worded_commands_take_arguments() {
    assert_eq!(parse_command("size 42"), Some(InputCommand::Size(42)));
    assert_eq!(parse_command("speed 3"), Some(InputCommand::Speed(3)));
    assert_eq!(
        parse_command("algo quick"),
        Some(InputCommand::Select(Algorithm::Quick))
    );
    assert_eq!(
        parse_command("algo shell"),
        Some(InputCommand::Select(Algorithm::Bubble))
    );
    assert_eq!(parse_command("size many"), None);
    assert_eq!(parse_command(""), None);
    assert_eq!(parse_command("x"), None);
}

fn session(values: Vec<u32>) -> (Session, RunController) {
    let controller = RunController::with_sequence(
        ControllerConfig {
            time_unit: Duration::ZERO,
            range: MagnitudeRange::new(1, 9).expect("range"),
            ..ControllerConfig::default()
        },
        values,
        Box::new(NullRenderer),
    );
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let themes =
        ThemeStore::new(std::env::temp_dir().join(format!("sortviz_input_{suffix}.toml")));
    let (theme, _) = watch::channel(Theme::Dark);
    (
        Session::new(controller.clone(), themes, theme, true),
        controller,
    )
}

#[tokio::test]
async fn scripted_session_sorts_then_resets() {
    let (session, controller) = session(vec![4, 1, 3, 2]);
    let script: &[u8] = b"4\ns\nq\n";
    session.run(script).await.expect("session");

    let status = controller.status();
    assert_eq!(status.algorithm, Algorithm::Merge);
    assert_eq!(status.sequence, vec![1, 2, 3, 4]);

    controller.reset().await.expect("idle");
    assert_eq!(controller.status().sequence, vec![4, 1, 3, 2]);
}

#[tokio::test]
async fn size_command_regenerates_sequence() {
    let (mut session, controller) = session(vec![2, 1]);
    session.dispatch(InputCommand::Size(9)).await;
    assert_eq!(controller.status().sequence.len(), 9);
}

#[tokio::test]
async fn size_command_is_bounded_by_the_size_control() {
    let (mut session, controller) = session(vec![2, 1]);
    let command = parse_command("size 5000").expect("size command");
    session.dispatch(command).await;
    assert_eq!(controller.status().sequence.len(), MAX_SIZE);

    session.dispatch(InputCommand::Size(0)).await;
    assert_eq!(controller.status().sequence.len(), 1);
}

#[tokio::test]
async fn toggle_theme_publishes_and_persists() {
    let (mut session, _) = session(vec![1]);
    let mut theme = session.theme.subscribe();
    session.dispatch(InputCommand::ToggleTheme).await;

    assert!(theme.has_changed().expect("theme channel"));
    assert_eq!(*theme.borrow_and_update(), Theme::Light);
    assert_eq!(session.themes.load(), Theme::Light);
    std::fs::remove_file(session.themes.path()).expect("cleanup");
}
