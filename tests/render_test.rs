use cheatkeys::config::MatcherConfig;
use cheatkeys::main_app::{App, run_app_with_event_source};
use cheatkeys::test_utils::test_helpers::{
    TestScenarioBuilder, capture_terminal_state, create_test_terminal,
};
use std::fs;
use tempfile::TempDir;

// 1x1 GIF
const TINY_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xff, 0xff, 0xff,
    0x00, 0x00, 0x00, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

fn render_after(app: &mut App, scenario: TestScenarioBuilder) -> String {
    let mut terminal = create_test_terminal(70, 16);
    let mut event_source = scenario.quit().build();
    run_app_with_event_source(&mut terminal, app, &mut event_source).unwrap();
    // The loop draws before each read, so the final state needs one more frame
    terminal.draw(|f| app.draw(f)).unwrap();
    capture_terminal_state(&terminal)
}

#[test]
fn test_initial_screen_shows_placeholder() {
    let mut app = App::default();
    let screen = render_after(&mut app, TestScenarioBuilder::new());

    assert!(screen.contains("cheatkeys  keydown / 1000ms"));
    assert!(screen.contains("User input"));
    assert!(screen.contains("Nothing"));
    assert!(screen.contains("ctrl+c quit"));
}

#[test]
fn test_matched_code_is_rendered() {
    let mut app = App::default();
    let screen = render_after(&mut app, TestScenarioBuilder::new().type_text("idkfa", 100));

    assert!(screen.contains("│idkfa"));
    assert!(screen.contains("All Weapons + Ammo + Keys"));
    assert!(!screen.contains("Nothing"));
    assert!(screen.contains("images/idkfa.jpg (not found)"));
}

#[test]
fn test_background_image_dimensions() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("idfa.gif"), TINY_GIF).unwrap();

    let mut app = App::new(MatcherConfig {
        image_dir: temp_dir.path().to_path_buf(),
        image_extension: "gif".to_string(),
        ..MatcherConfig::default()
    });
    render_after(&mut app, TestScenarioBuilder::new().type_text("idfa", 100));

    let background = app.background().unwrap();
    assert_eq!(background.path(), temp_dir.path().join("idfa.gif"));
    assert!(background.describe().ends_with("idfa.gif (1x1)"));
}

#[test]
fn test_custom_placeholder() {
    let mut app = App::new(MatcherConfig {
        placeholder: "No cheat".to_string(),
        ..MatcherConfig::default()
    });
    let screen = render_after(&mut app, TestScenarioBuilder::new().type_text("abc", 100));

    assert!(screen.contains("│abc"));
    assert!(screen.contains("No cheat"));
}
