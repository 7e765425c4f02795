use super::*;

#[test]
fn parses_match_do_pairs_ignoring_blanks_and_comments() {
    let src = "# a comment\n\nmatch ^https?://\ndo open $0\n";
    let rules = parse(src).unwrap();
    assert_eq!(rules.rules.len(), 1);
}

#[test]
fn rejects_unrecognized_lines() {
    let src = "garbage line\n";
    assert!(parse(src).is_err());
}

#[test]
fn rejects_do_without_match() {
    let src = "do open $0\n";
    assert!(parse(src).is_err());
}

#[test]
fn acquire_tries_rules_in_order_and_stops_at_first_match() {
    let src = "match \\.rs$\ndo rustfmt $0\nmatch .*\ndo open $0\n";
    let rules = parse(src).unwrap();
    let mut invoked = None;
    let plumbed = rules.acquire("main.rs", |cmd| {
        invoked = Some(cmd.to_string());
        Ok(())
    }).unwrap();
    assert!(plumbed);
    assert_eq!(invoked.unwrap(), "rustfmt main.rs");
}

#[test]
fn acquire_returns_false_when_nothing_matches() {
    let src = "match ^only-this$\ndo open $0\n";
    let rules = parse(src).unwrap();
    let plumbed = rules.acquire("something-else", |_| Ok(())).unwrap();
    assert!(!plumbed);
}

#[test]
fn capture_groups_expand_by_position() {
    let src = "match ^(\\w+)://(.*)$\ndo fetch $1 $2\n";
    let rules = parse(src).unwrap();
    let mut invoked = String::new();
    rules.acquire("https://example.com/page", |cmd| {
        invoked = cmd.to_string();
        Ok(())
    }).unwrap();
    assert_eq!(invoked, "fetch https example.com/page");
}
