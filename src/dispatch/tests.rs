use super::*;

#[test]
fn pipe_prefixes_resolve_to_piped_variants() {
    let aliases = AliasTable::new();
    let r = resolve("|sort", "/tmp", &aliases, &()).unwrap();
    assert!(matches!(r, Resolved::Piped { kind: PipeKind::Pipe, .. }));
    let r = resolve(">tail -f", "/tmp", &aliases, &()).unwrap();
    assert!(matches!(r, Resolved::Piped { kind: PipeKind::Emit, .. }));
    let r = resolve("<date", "/tmp", &aliases, &()).unwrap();
    assert!(matches!(r, Resolved::Piped { kind: PipeKind::Inject, .. }));
}

#[test]
fn leading_plus_forces_local_execution() {
    let aliases = AliasTable::new();
    let r = resolve("+|sort", "/tmp", &aliases, &()).unwrap();
    match r {
        Resolved::Piped { local_only, .. } => assert!(local_only),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn bang_prefix_is_an_expression() {
    let aliases = AliasTable::new();
    let r = resolve("!x/foo/ d", "/tmp", &aliases, &()).unwrap();
    assert!(matches!(r, Resolved::Expression(s) if s == "x/foo/ d"));
}

#[test]
fn alias_expands_with_positional_and_star_args() {
    let mut aliases = AliasTable::new();
    aliases.set("mk", "New $1;Put $*");
    let r = resolve("mk foo.txt bar", "/tmp", &aliases, &()).unwrap();
    match r {
        Resolved::Alias(_, expanded) => {
            assert_eq!(expanded, vec!["New foo.txt", "Put foo.txt bar"]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn builtin_command_is_recognized() {
    let aliases = AliasTable::new();
    let r = resolve("New", "/tmp", &aliases, &()).unwrap();
    assert!(matches!(r, Resolved::Builtin(Builtin::New, _)));
}

#[test]
fn unmatched_name_falls_through_to_external() {
    let aliases = AliasTable::new();
    let r = resolve("ls -la", "/tmp", &aliases, &()).unwrap();
    match r {
        Resolved::External(ctx) => {
            assert_eq!(ctx.cmd, "ls");
            assert_eq!(ctx.arg, vec!["-la".to_string()]);
            assert_eq!(ctx.dir, "/tmp");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn resolved_expression_runs_against_a_live_model() {
    let aliases = AliasTable::new();
    let r = resolve("!x/abc/ c/XY/", "/tmp", &aliases, &()).unwrap();
    let Resolved::Expression(expr_src) = r else { panic!("expected an expression") };

    let mut model = EditableModel::new(crate::buffer::PieceTable::from_str("abc\nabc\nabc"));
    let mut sink = crate::error::CollectingErrorSink::default();
    let result = run_expression(&expr_src, &mut model, &mut sink, "/tmp").unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(String::from_utf8(model.text()).unwrap(), "XY\nXY\nXY");
}

struct FakeApi;
impl ApiCommandMatcher for FakeApi {
    fn find(&self, name: &str) -> Option<String> {
        (name == "DoThing").then(|| "session-1".to_string())
    }
}

#[test]
fn api_session_command_takes_priority_over_external() {
    let aliases = AliasTable::new();
    let r = resolve("DoThing arg1", "/tmp", &aliases, &FakeApi).unwrap();
    match r {
        Resolved::ApiUserCommand { session, name, args } => {
            assert_eq!(session, "session-1");
            assert_eq!(name, "DoThing");
            assert_eq!(args, vec!["arg1".to_string()]);
        }
        other => panic!("unexpected {other:?}"),
    }
}
