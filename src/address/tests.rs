use super::*;

/// A handler over a plain `String`, just enough surface to exercise
/// address evaluation without a real editor behind it.
struct TestHandler {
    text: String,
    reverse: bool,
    deleted: Vec<AddrRange>,
    inserted: Vec<(usize, String)>,
    displayed: Vec<AddrRange>,
    copied: Vec<AddrRange>,
}

impl TestHandler {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            reverse: false,
            deleted: Vec::new(),
            inserted: Vec::new(),
            displayed: Vec::new(),
            copied: Vec::new(),
        }
    }

    fn line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, c) in self.text.chars().enumerate() {
            if c == '\n' {
                starts.push(i + 1);
            }
        }
        starts
    }
}

impl Handler for TestHandler {
    fn doc_len(&self) -> usize {
        self.text.chars().count()
    }

    fn current_primary(&self) -> AddrRange {
        AddrRange::new(0, 0)
    }

    fn line_range(&self, line: usize) -> Result<AddrRange> {
        let starts = self.line_starts();
        let idx = line.saturating_sub(1);
        let start = *starts.get(idx).ok_or_else(|| {
            AnvilError::user(crate::constants::errors::BAD_ADDRESS, "no such line")
        })?;
        let end = starts.get(idx + 1).map(|e| e - 1).unwrap_or(self.doc_len());
        Ok(AddrRange::new(start, end))
    }

    fn search_forward(&self, pattern: &str, from: usize) -> Result<Option<AddrRange>> {
        let re = regex::Regex::new(pattern).unwrap();
        let chars: Vec<char> = self.text.chars().collect();
        let byte_from: usize = chars[..from.min(chars.len())].iter().collect::<String>().len();
        Ok(re.find_at(&self.text, byte_from).map(|m| {
            let start = self.text[..m.start()].chars().count();
            let end = self.text[..m.end()].chars().count();
            AddrRange::new(start, end)
        }))
    }

    fn find_all(&self, pattern: &str, range: AddrRange, limit: usize) -> Result<Vec<AddrRange>> {
        let re = regex::Regex::new(pattern).unwrap();
        let chars: Vec<char> = self.text.chars().collect();
        let slice: String = chars[range.start..range.end].iter().collect();
        let mut out = Vec::new();
        for m in re.find_iter(&slice) {
            if out.len() >= limit {
                break;
            }
            let start = range.start + slice[..m.start()].chars().count();
            let end = range.start + slice[..m.end()].chars().count();
            out.push(AddrRange::new(start, end));
        }
        Ok(out)
    }

    fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    fn delete(&mut self, range: AddrRange) -> Result<()> {
        self.deleted.push(range);
        let mut chars: Vec<char> = self.text.chars().collect();
        let start = range.start.min(chars.len());
        let end = range.end.min(chars.len());
        chars.drain(start..end);
        self.text = chars.into_iter().collect();
        Ok(())
    }

    fn copy(&mut self, range: AddrRange) -> Result<()> {
        self.copied.push(range);
        Ok(())
    }

    fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        self.inserted.push((pos, text.to_string()));
        let mut chars: Vec<char> = self.text.chars().collect();
        let pos = pos.min(chars.len());
        for (i, c) in text.chars().enumerate() {
            chars.insert(pos + i, c);
        }
        self.text = chars.into_iter().collect();
        Ok(())
    }

    fn display(&mut self, range: AddrRange) -> Result<()> {
        self.displayed.push(range);
        Ok(())
    }

    fn display_contents(&mut self, _range: AddrRange, _prefix: &str, _with_pos: bool) -> Result<()> {
        Ok(())
    }

    fn noop(&mut self, _range: AddrRange) -> Result<()> {
        Ok(())
    }

    fn done(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn line_address_resolves_to_line_range() {
    let mut h = TestHandler::new("one\ntwo\nthree");
    let expr = parse("2").unwrap();
    let result = evaluate(&expr, &[], &mut h).unwrap();
    assert_eq!(result, vec![AddrRange::new(4, 7)]);
}

#[test]
fn dollar_and_zero_address_document_bounds() {
    let mut h = TestHandler::new("hello");
    let dollar = evaluate(&parse("$").unwrap(), &[], &mut h).unwrap();
    assert_eq!(dollar, vec![AddrRange::new(5, 5)]);
    let zero = evaluate(&parse("0").unwrap(), &[], &mut h).unwrap();
    assert_eq!(zero, vec![AddrRange::new(0, 0)]);
}

#[test]
fn comma_range_spans_start_of_first_to_end_of_second() {
    let mut h = TestHandler::new("one\ntwo\nthree\n");
    let result = evaluate(&parse("1,3").unwrap(), &[], &mut h).unwrap();
    assert_eq!(result, vec![AddrRange::new(0, 13)]);
}

#[test]
fn x_loop_yields_one_range_per_match() {
    let mut h = TestHandler::new("foo bar foo baz foo");
    let result = evaluate(&parse("x/foo/").unwrap(), &[], &mut h).unwrap();
    assert_eq!(result.len(), 3);
}

#[test]
fn g_filter_keeps_only_ranges_containing_match() {
    let mut h = TestHandler::new("alpha\nbeta\ngamma\n");
    let line1 = h.line_range(1).unwrap();
    let line2 = h.line_range(2).unwrap();
    let input = vec![line1, line2];
    let result = evaluate(&parse("g/a/").unwrap(), &input, &mut h).unwrap();
    assert_eq!(result, vec![line1, line2]);
    let result_b = evaluate(&parse("g/z/").unwrap(), &input, &mut h).unwrap();
    assert!(result_b.is_empty());
}

#[test]
fn group_fan_out_evaluates_each_sub_expression_against_same_input() {
    let mut h = TestHandler::new("one\ntwo\nthree\n");
    let result = evaluate(&parse("{1 2}").unwrap(), &[], &mut h).unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn loop_then_change_command_replaces_every_match() {
    let mut h = TestHandler::new("abc\nabc\nabc");
    evaluate(&parse("x/abc/ c/XY/").unwrap(), &[], &mut h).unwrap();
    assert_eq!(h.text, "XY\nXY\nXY");
}

#[test]
fn delete_command_removes_the_matched_range() {
    let mut h = TestHandler::new("keep DROP keep");
    let dot = AddrRange::new(0, 0);
    evaluate(&parse("/DROP/ d").unwrap(), &[dot], &mut h).unwrap();
    assert_eq!(h.text, "keep  keep");
}

#[test]
fn insert_and_append_commands_place_text_at_range_edges() {
    let dot = AddrRange::new(0, 0);
    let mut before = TestHandler::new("middle");
    evaluate(&parse("/middle/ i/[/").unwrap(), &[dot], &mut before).unwrap();
    assert_eq!(before.text, "[middle");

    let mut after = TestHandler::new("middle");
    evaluate(&parse("/middle/ a/]/").unwrap(), &[dot], &mut after).unwrap();
    assert_eq!(after.text, "middle]");
}

#[test]
fn substitute_command_replaces_only_the_first_match_in_range() {
    let mut h = TestHandler::new("foo bar foo");
    evaluate(&parse("0,$ s/foo/baz/").unwrap(), &[], &mut h).unwrap();
    assert_eq!(h.text, "baz bar foo");
}

#[test]
fn substitute_command_is_a_noop_when_nothing_matches() {
    let mut h = TestHandler::new("no match here");
    evaluate(&parse("0,$ s/zzz/q/").unwrap(), &[], &mut h).unwrap();
    assert_eq!(h.text, "no match here");
}

#[test]
fn print_position_and_copy_commands_record_the_range_without_mutating_text() {
    let dot = AddrRange::new(0, 0);
    let mut h = TestHandler::new("one two three");
    evaluate(&parse("/two/ p").unwrap(), &[dot], &mut h).unwrap();
    assert_eq!(h.text, "one two three");

    evaluate(&parse("/two/ =").unwrap(), &[dot], &mut h).unwrap();
    assert_eq!(h.displayed.len(), 1);

    evaluate(&parse("/two/ C").unwrap(), &[dot], &mut h).unwrap();
    assert_eq!(h.copied.len(), 1);
    assert_eq!(h.text, "one two three");
}
