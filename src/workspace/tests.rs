use super::*;
use crate::buffer::PieceTable;

fn body(text: &str) -> EditableModel {
    EditableModel::new(PieceTable::from_str(text))
}

#[test]
fn add_column_and_window_registers_both_and_links_column() {
    let mut ed = Editor::new(10.0, 100.0);
    let col = ed.add_column();
    let win = ed.add_window(col, local_path("a.txt"), body("hello")).unwrap();
    assert_eq!(ed.column_of(win), Some(col));
    assert!(ed.window(win).is_some());
    assert_eq!(ed.windows_sorted_by_top_y(col), vec![win]);
}

#[test]
fn removing_a_window_drops_it_from_its_column() {
    let mut ed = Editor::new(10.0, 100.0);
    let col = ed.add_column();
    let win = ed.add_window(col, local_path("a.txt"), body("x")).unwrap();
    ed.remove_window(win);
    assert!(ed.window(win).is_none());
    assert!(ed.windows_sorted_by_top_y(col).is_empty());
}

#[test]
fn removing_a_column_drops_all_its_windows() {
    let mut ed = Editor::new(10.0, 100.0);
    let col = ed.add_column();
    let w1 = ed.add_window(col, local_path("a.txt"), body("x")).unwrap();
    let w2 = ed.add_window(col, local_path("b.txt"), body("y")).unwrap();
    ed.remove_column(col);
    assert!(ed.window(w1).is_none());
    assert!(ed.window(w2).is_none());
    assert!(ed.columns_sorted_by_left_x().is_empty());
}

#[test]
fn columns_are_ordered_by_packer_insertion_order() {
    let mut ed = Editor::new(10.0, 100.0);
    let c1 = ed.add_column();
    let c2 = ed.add_column();
    assert_eq!(ed.columns_sorted_by_left_x(), vec![c1, c2]);
}

#[test]
fn work_items_queued_from_another_thread_run_on_drain() {
    let mut ed = Editor::new(10.0, 100.0);
    let col = ed.add_column();
    let tx = ed.work_sender();
    let handle = std::thread::spawn(move || {
        tx.send(Box::new(move |e: &mut Editor| {
            e.add_window(col, local_path("from-thread.txt"), EditableModel::new(PieceTable::from_str("")));
            true
        }) as WorkItem)
        .unwrap();
    });
    handle.join().unwrap();
    ed.drain_work();
    assert_eq!(ed.windows_sorted_by_top_y(col).len(), 1);
}

#[test]
fn run_expression_edits_window_body_and_clears_the_tracked_job() {
    let mut ed = Editor::new(10.0, 100.0);
    let col = ed.add_column();
    let win = ed.add_window(col, local_path("a.txt"), body("abc\nabc\nabc")).unwrap();
    let mut sink = crate::error::CollectingErrorSink::default();
    let result = ed.run_expression(win, "x/abc/ c/XY/", &mut sink).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(String::from_utf8(ed.window(win).unwrap().body.text()).unwrap(), "XY\nXY\nXY");
    assert!(ed.jobs.is_empty());
}

#[test]
fn run_expression_on_missing_window_errors() {
    let mut ed = Editor::new(10.0, 100.0);
    let mut sink = crate::error::CollectingErrorSink::default();
    assert!(ed.run_expression(999, "p", &mut sink).is_err());
}

fn local_path(path: &str) -> GlobalPath {
    crate::global_path::parse(path, false)
}
