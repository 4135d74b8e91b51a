//! Tests for argument vector construction.

use acompilator_runner::compiler::{CompileCommand, CompileOptions};

#[test]
fn echo_uno_scenario_builds_the_exact_argv() {
    let options = CompileOptions::new("/bin/echo", "/tmp")
        .y_flag(true)
        .test_compiler(false)
        .board("UNO");
    let command = CompileCommand::from_options(&options);

    assert_eq!(command.argv(), ["/bin/echo", "-y", "-p=/tmp", "--board=UNO"]);
}

#[test]
fn program_and_args_split_the_vector() {
    let options = CompileOptions::new("/opt/acomp", "/work").n_flag(true).board("MEGA");
    let command = CompileCommand::from_options(&options);

    assert_eq!(command.program(), "/opt/acomp");
    assert_eq!(command.args(), ["-n", "-p=/work", "--board=MEGA"]);
}

#[test]
fn flag_order_is_stable_regardless_of_setter_order() {
    let a = CompileOptions::new("acomp", "/w")
        .board("UNO")
        .no_cleanup(true)
        .y_flag(true);
    let b = CompileOptions::new("acomp", "/w")
        .y_flag(true)
        .no_cleanup(true)
        .board("UNO");

    assert_eq!(
        CompileCommand::from_options(&a),
        CompileCommand::from_options(&b)
    );
    assert_eq!(
        CompileCommand::from_options(&a).argv(),
        ["acomp", "-y", "-nocleanup", "-p=/w", "--board=UNO"]
    );
}

#[test]
fn every_board_becomes_one_argument() {
    let boards = vec!["UNO".to_string(), "MEGA".to_string(), "NANO".to_string()];
    let options = CompileOptions::new("acomp", "/w").boards(boards.clone());
    let command = CompileCommand::from_options(&options);

    let board_args: Vec<String> = command
        .argv()
        .iter()
        .filter(|a| a.starts_with("--board="))
        .cloned()
        .collect();
    assert_eq!(board_args.len(), boards.len());
    for (arg, board) in board_args.iter().zip(&boards) {
        assert_eq!(arg, &format!("--board={board}"));
    }
}

#[test]
fn display_renders_a_runnable_line() {
    let options = CompileOptions::new("/bin/echo", "/tmp").y_flag(true).board("UNO");
    let command = CompileCommand::from_options(&options);
    assert_eq!(command.to_string(), "/bin/echo -y -p=/tmp --board=UNO");
}

#[test]
fn from_parts_keeps_argument_order() {
    let command = CompileCommand::from_parts("sh", ["-c", "echo hi"]);
    assert_eq!(command.argv(), ["sh", "-c", "echo hi"]);
}
