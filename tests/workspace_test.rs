use rstest::{fixture, rstest};

use dsviz::application::{parse_line, parse_script, ApplicationError, Outcome, Structure, Workspace};
use dsviz::config::Settings;
use dsviz::domain::{DomainError, EdgePolicy, NodeId};
use dsviz::util::testing;

#[fixture]
fn workspace() -> Workspace {
    testing::init_test_setup();
    Workspace::new(Settings::default()).unwrap()
}

fn run(workspace: &mut Workspace, line: &str) -> Result<Outcome, ApplicationError> {
    let command = parse_line(line)?.ok_or_else(|| ApplicationError::config("empty line"))?;
    workspace.execute(&command)
}

#[rstest]
fn given_array_when_mutated_then_undo_and_redo_walk_snapshots(mut workspace: Workspace) {
    run(&mut workspace, "array push 4").unwrap();
    run(&mut workspace, "array delete 0").unwrap();
    assert_eq!(workspace.array(), &[2, 3, 4]);

    run(&mut workspace, "array undo").unwrap();
    assert_eq!(workspace.array(), &[1, 2, 3, 4]);
    run(&mut workspace, "array undo").unwrap();
    assert_eq!(workspace.array(), &[1, 2, 3]);
    run(&mut workspace, "array redo").unwrap();
    assert_eq!(workspace.array(), &[1, 2, 3, 4]);
    assert_eq!(workspace.history_position(Structure::Array), (1, 3));
}

#[rstest]
#[case("array delete 7", Structure::Array)]
#[case("array get 3", Structure::Array)]
#[case("array search 42", Structure::Array)]
#[case("list up 9", Structure::List)]
#[case("tree add 99 orphan", Structure::Tree)]
#[case("tree delete 99", Structure::Tree)]
#[case("graph edge 1 99", Structure::Graph)]
#[case("graph edge 2 1", Structure::Graph)]
#[case("playlist remove 9", Structure::Playlist)]
#[case("commits checkout c99", Structure::Commits)]
fn given_invalid_command_when_executed_then_error_and_state_unchanged(
    mut workspace: Workspace,
    #[case] line: &str,
    #[case] structure: Structure,
) {
    let before = workspace.render(structure);
    let position = workspace.history_position(structure);

    let result = run(&mut workspace, line);

    assert!(matches!(result, Err(ApplicationError::Domain(_))), "{line}");
    assert_eq!(workspace.render(structure), before);
    assert_eq!(workspace.history_position(structure), position);
}

#[rstest]
fn given_full_stack_when_pushing_then_capacity_exceeded(mut workspace: Workspace) {
    run(&mut workspace, "stack push 4").unwrap();
    run(&mut workspace, "stack push 5").unwrap();

    let result = run(&mut workspace, "stack push 6");

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::CapacityExceeded { capacity: 5 }))
    ));
    assert_eq!(workspace.stack().items(), &[1, 2, 3, 4, 5]);
}

#[rstest]
fn given_queue_when_dequeued_then_front_removed(mut workspace: Workspace) {
    run(&mut workspace, "queue dequeue").unwrap();
    assert_eq!(workspace.queue().items(), &[20, 30]);
}

#[rstest]
fn given_tree_when_adding_then_next_free_id_used(mut workspace: Workspace) {
    run(&mut workspace, "tree add 3 Leaf B1").unwrap();

    let node = dsviz::domain::tree::find_node(workspace.forest(), NodeId(6)).unwrap();
    assert_eq!(node.label, "Leaf B1");

    let outcome = run(&mut workspace, "tree info 6").unwrap();
    assert!(matches!(outcome, Outcome::Report(ref text) if text.contains("depth: 3, height: 1")));
}

#[rstest]
fn given_tree_when_info_without_id_then_forest_summary(mut workspace: Workspace) {
    run(&mut workspace, "tree add 3 Leaf B1").unwrap();

    let outcome = run(&mut workspace, "tree info").unwrap();

    assert_eq!(
        outcome,
        Outcome::Report("6 nodes in 1 tree(s), height 3, leaves [#4, #5, #6]".to_string())
    );
}

#[rstest]
fn given_inner_node_when_info_then_parent_height_and_leaves(mut workspace: Workspace) {
    let Outcome::Report(text) = run(&mut workspace, "tree info 2").unwrap() else {
        panic!("tree info should report");
    };
    assert!(text.contains("parent: #1"), "{text}");
    assert!(text.contains("height: 2"), "{text}");
    assert!(text.contains("leaves: [#4, #5]"), "{text}");
}

#[rstest]
fn given_tree_when_shown_then_rendered_as_tree(mut workspace: Workspace) {
    let Outcome::Report(text) = run(&mut workspace, "tree show").unwrap() else {
        panic!("show should report");
    };
    assert!(text.starts_with("Root (#1)"), "{text}");
    assert_eq!(text.lines().count(), 5);
}

#[rstest]
fn given_graph_when_node_added_then_default_label(mut workspace: Workspace) {
    run(&mut workspace, "graph node").unwrap();
    let last = workspace.graph().nodes().last().unwrap();
    assert_eq!(last.label, "Node G");
    assert_eq!(workspace.graph().policy(), EdgePolicy::Strict);
}

#[rstest]
fn given_playing_queue_when_ticked_past_delay_then_current_item_removed(
    mut workspace: Workspace,
) {
    let first = run(&mut workspace, "playlist tick 1000").unwrap();
    assert!(matches!(first, Outcome::Report(_)));
    assert_eq!(workspace.playlist().len(), 3);

    let fired = run(&mut workspace, "playlist tick 2000").unwrap();
    assert_eq!(fired, Outcome::Changed(Structure::Playlist));
    assert_eq!(workspace.playlist().len(), 2);
    assert_eq!(
        workspace.playlist().current().map(String::as_str),
        Some("Blinding Lights")
    );
}

#[rstest]
fn given_paused_queue_when_ticked_then_nothing_removed(mut workspace: Workspace) {
    run(&mut workspace, "playlist pause").unwrap();
    run(&mut workspace, "playlist tick 10000").unwrap();
    assert_eq!(workspace.playlist().len(), 3);
    assert!(!workspace.auto_advance().is_pending());
}

#[rstest]
fn given_commit_when_added_then_parent_is_checked_out_commit(mut workspace: Workspace) {
    let before = workspace.commits().commits().len();
    run(&mut workspace, "commits add fix the build").unwrap();

    let log = workspace.commits();
    assert_eq!(log.commits().len(), before + 1);
    let added = log.commits().last().unwrap();
    assert_eq!(added.message, "fix the build");
    assert!(added.parent.is_some());
}

#[rstest]
fn given_mutated_structure_when_reset_then_seed_restored_and_undoable(mut workspace: Workspace) {
    run(&mut workspace, "list pop").unwrap();
    run(&mut workspace, "list reset").unwrap();
    assert_eq!(workspace.list(), &[1, 2, 3]);

    run(&mut workspace, "list undo").unwrap();
    assert_eq!(workspace.list(), &[1, 2]);
}

#[rstest]
fn given_script_when_parsed_then_bad_lines_keep_their_numbers() {
    let script = "# demo\nstack push 1\nstack shove 2\n\nqueue enqueue x\narray sort\n";
    let parsed = parse_script(script);

    let lines: Vec<_> = parsed.iter().map(|(line, r)| (*line, r.is_ok())).collect();
    assert_eq!(lines, vec![(2, true), (3, false), (5, false), (6, true)]);
}

#[rstest]
fn given_show_command_when_executed_then_report_without_history(mut workspace: Workspace) {
    let outcome = run(&mut workspace, "list show").unwrap();
    assert_eq!(outcome, Outcome::Report("1 -> 2 -> 3 -> null".to_string()));
    assert_eq!(workspace.history_position(Structure::List), (0, 1));
}
