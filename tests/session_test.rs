use std::io::Write;

use pretty_assertions::assert_eq;
use sentience::{config::InterpreterConfig, session::Session, Error};

const SCRIPT: &str = r#"
agent Echo {
  mem short
  on input(data) {
    embed msg -> mem.long
    reflect { mem.short["msg"] }
  }
}
"#;

fn script_file(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

#[test]
fn it_runs_file_with_input() {
    let file = script_file(SCRIPT);
    let mut session = Session::default();
    let mut out = Vec::new();
    session
        .run_file(file.path(), Some("hello"), &mut out)
        .unwrap();

    assert_eq!(
        &out[out.len() - 3..],
        &[
            "  Embed: msg -> mem.long".to_string(),
            "  Reflect block:".to_string(),
            r#"    mem.short["msg"] = "hello""#.to_string(),
        ]
    );
    assert_eq!(session.context().get_mem("long", "msg"), "hello");
}

#[test]
fn it_runs_file_without_input() {
    let file = script_file(SCRIPT);
    let mut session = Session::default();
    let mut out = Vec::new();
    session.run_file(file.path(), None, &mut out).unwrap();
    assert_eq!(out.last().unwrap(), "Agent: Echo [registered]");
}

#[test]
fn it_reports_missing_agent_for_input() {
    let file = script_file(r#"print "no agent here""#);
    let mut session = Session::default();
    let mut out = Vec::new();
    session.run_file(file.path(), Some("x"), &mut out).unwrap();
    assert_eq!(out, vec!["no agent here", "No agent registered."]);
}

#[test]
fn it_fails_on_missing_script() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::default();
    let mut out = Vec::new();
    let err = session
        .run_file(dir.path().join("absent.sent"), None, &mut out)
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(out.is_empty());
}

#[test]
fn it_drives_a_repl_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("ctx.json");
    let config = InterpreterConfig {
        snapshot_path: snapshot.to_str().unwrap().to_string(),
        ..InterpreterConfig::default()
    };

    let mut session = Session::new(&config);
    let mut out = Vec::new();
    for line in [
        "agent Mind {",
        "  on input(msg) {",
        "    embed msg -> mem.short",
        "  }",
        "  train { reflect mem.short[\"msg\"] }",
        "}",
        ".input hello world",
        ".train practice",
        ".save",
    ] {
        session.feed_line(line, &mut out);
    }
    assert!(out.contains(&"Agent: Mind [registered]".to_string()));
    assert!(out.contains(&r#"  mem.short["msg"] = "practice""#.to_string()));
    assert_eq!(out.last().unwrap(), &format!("Saved to {}", snapshot.display()));

    let mut restored = Session::new(&config);
    let mut out = Vec::new();
    restored.feed_line(".load", &mut out);
    restored.feed_line(".similar hello world", &mut out);
    assert_eq!(
        out,
        vec![
            format!("Loaded from {}", snapshot.display()),
            "Similar: msg".to_string(),
        ]
    );
    assert_eq!(restored.context().get_mem("short", "msg"), "practice");
}

#[test]
fn it_relays_input_through_include_lists() {
    let config: InterpreterConfig = r#"{ "condition_mode": "context_includes" }"#.parse().unwrap();
    let mut session = Session::new(&config);
    let mut out = Vec::new();
    session.run_source(
        r#"agent Relay { on input(msg) { if context includes ["joy", "calm"] { output = input } } }"#,
        &mut out,
    );

    assert_eq!(
        session.handle_input("calm seas").as_deref(),
        Some("If: context includes[\"joy\",\"calm\"]\n  Output: \"calm seas\"")
    );
    assert_eq!(session.context().output(), Some("calm seas"));

    session.context_mut().take_output();
    assert!(session
        .handle_input("storm")
        .is_some_and(|text| text.ends_with("Condition false: context includes[\"joy\",\"calm\"]")));
    assert_eq!(session.context().output(), None);
}
