use cmdloop::{
    CommandSpec, EventKind, EventSpec, HandlerResult, LineSource, Param, ReadOutcome,
    ScriptedInput, Shell, ShellConfig, ShellError, ShellState,
};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

type Calls = Rc<RefCell<Vec<Vec<String>>>>;

fn quiet_shell() -> Shell<Vec<u8>> {
    Shell::with_output(
        ShellConfig {
            welcome: String::new(),
            ..ShellConfig::default()
        },
        Vec::new(),
    )
}

fn output(shell: &Shell<Vec<u8>>) -> String {
    String::from_utf8(shell.output().clone()).unwrap()
}

fn record(calls: &Calls) -> impl FnMut(&[String]) -> HandlerResult + 'static {
    let calls = Rc::clone(calls);
    move |args: &[String]| -> HandlerResult {
        calls.borrow_mut().push(args.to_vec());
        Ok(())
    }
}

fn add(args: &[String]) -> HandlerResult {
    let a: i64 = args.first().ok_or("missing operand")?.parse()?;
    let b: i64 = match args.get(1) {
        Some(raw) => raw.parse()?,
        None => 1,
    };
    a.checked_add(b).ok_or("overflow")?;
    Ok(())
}

#[test]
fn add_scenario_captures_defaults_and_passes_raw_args() {
    let calls = Calls::default();
    let mut shell = quiet_shell();
    shell
        .register_command(
            CommandSpec::new(record(&calls))
                .name("add")
                .param("a")
                .param_default("b", "1"),
        )
        .unwrap();

    shell
        .run(&mut ScriptedInput::from_lines(["add 5", "exit"]))
        .unwrap();

    assert_eq!(*calls.borrow(), vec![vec!["5".to_string()]]);
    assert_eq!(
        shell.commands()["add"].parameters(),
        &[Param::required("a"), Param::with_default("b", "1")]
    );
}

#[test]
fn fn_item_registers_under_its_own_name() {
    let mut shell = quiet_shell();
    shell.register_command(CommandSpec::new(add)).unwrap();
    assert!(shell.commands().contains_key("add"));
    assert_eq!(shell.commands()["add"].description(), "No description");
}

#[test]
fn exit_fires_once_without_before_or_after() {
    let exits = Calls::default();
    let wraps = Calls::default();
    let mut shell = quiet_shell();
    shell.on("exit", record(&exits)).unwrap();
    shell.on("before", record(&wraps)).unwrap();
    shell.on("after", record(&wraps)).unwrap();

    let mut input = ScriptedInput::from_lines(["exit", "greet"]);
    shell.run(&mut input).unwrap();

    assert_eq!(exits.borrow().len(), 1);
    assert!(wraps.borrow().is_empty());
    assert_eq!(input.remaining(), 1);
    assert_eq!(shell.state(), ShellState::Terminated);
}

#[test]
fn exit_with_arguments_still_exits() {
    let exits = Calls::default();
    let mut shell = quiet_shell();
    shell.on("exit", record(&exits)).unwrap();
    shell
        .run(&mut ScriptedInput::from_lines(["exit now"]))
        .unwrap();
    assert_eq!(exits.borrow().len(), 1);
}

#[test]
fn unknown_command_without_handler_prints_message() {
    let mut shell = quiet_shell();
    shell
        .run(&mut ScriptedInput::from_lines(["foo", "exit"]))
        .unwrap();
    assert_eq!(output(&shell), "Unknown command: foo\n");
}

#[test]
fn unknown_command_with_handler_is_silent() {
    let unknown = Calls::default();
    let mut shell = quiet_shell();
    shell.on("unknown_command", record(&unknown)).unwrap();
    shell.on("start", |_: &[String]| Ok(())).unwrap();

    shell
        .run(&mut ScriptedInput::from_lines(["foo bar", "exit"]))
        .unwrap();

    assert_eq!(*unknown.borrow(), vec![vec!["foo".to_string()]]);
    assert!(output(&shell).is_empty());
}

#[test]
fn failing_command_does_not_stop_the_loop() {
    let after = Calls::default();
    let greeted = Calls::default();
    let mut shell = quiet_shell();
    shell.on("start", |_: &[String]| Ok(())).unwrap();
    shell.on("after", record(&after)).unwrap();
    shell.register_command(CommandSpec::new(add)).unwrap();
    shell.cmd("greet", record(&greeted)).unwrap();

    shell
        .run(&mut ScriptedInput::from_lines(["add x", "greet Bob", "exit"]))
        .unwrap();

    assert_eq!(
        output(&shell),
        "Error executing 'add': invalid digit found in string\n"
    );
    assert_eq!(*greeted.borrow(), vec![vec!["Bob".to_string()]]);
    assert_eq!(after.borrow().len(), 2);
}

#[test]
fn error_handler_receives_command_and_detail() {
    let errors = Calls::default();
    let mut shell = quiet_shell();
    shell.on("error", record(&errors)).unwrap();
    shell
        .cmd("boom", |_: &[String]| Err("kaboom".into()))
        .unwrap();

    shell
        .run(&mut ScriptedInput::from_lines(["boom", "exit"]))
        .unwrap();

    assert_eq!(
        *errors.borrow(),
        vec![vec!["boom".to_string(), "kaboom".to_string()]]
    );
}

#[test]
fn disabled_event_falls_back_until_enabled() {
    let unknown = Calls::default();
    let mut shell = quiet_shell();
    shell
        .register_event(
            EventSpec::new(record(&unknown))
                .name("unknown_command")
                .disabled(true),
        )
        .unwrap();
    assert!(shell.disabled_events().contains_key(&EventKind::UnknownCommand));

    shell.execute_line("foo").unwrap();
    assert!(unknown.borrow().is_empty());

    assert!(shell.enable_event("unknown_command").unwrap());
    shell.execute_line("bar").unwrap();
    assert_eq!(*unknown.borrow(), vec![vec!["bar".to_string()]]);

    assert!(shell.disable_event("unknown_command").unwrap());
    assert!(!shell.events().contains_key(&EventKind::UnknownCommand));
}

#[test]
fn removed_command_becomes_unknown() {
    let mut shell = quiet_shell();
    shell.register_command(CommandSpec::new(add)).unwrap();
    assert!(shell.remove_command("add").unwrap());
    assert!(!shell.remove_command("add").unwrap());

    shell.execute_line("add 1").unwrap();
    assert_eq!(output(&shell), "Unknown command: add\n");
}

#[test]
fn invalid_event_names_are_rejected_for_every_non_kind() {
    let mut shell = quiet_shell();
    for name in ["quit", "Start", "before ", "unknown"] {
        let result = shell.on(name, |_: &[String]| Ok(()));
        assert!(
            matches!(result, Err(ShellError::InvalidEventKind(_))),
            "'{name}' should be rejected"
        );
    }
    assert!(shell.events().is_empty());
}

#[test]
fn end_of_input_fires_exit() {
    let exits = Calls::default();
    let mut shell = quiet_shell();
    shell.on("exit", record(&exits)).unwrap();
    shell
        .run(&mut ScriptedInput::from_lines(["", ""]))
        .unwrap();
    assert_eq!(exits.borrow().len(), 1);
    assert_eq!(shell.state(), ShellState::Terminated);
}

/// Output sink whose reader has gone away
struct ClosedSink;

impl Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Input source that fails on every read
struct BrokenInput;

impl LineSource for BrokenInput {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome, ShellError> {
        Err(io::Error::other("tty gone").into())
    }
}

#[test]
fn read_failure_fires_exit_and_returns_error() {
    let exits = Calls::default();
    let mut shell = quiet_shell();
    shell.on("exit", record(&exits)).unwrap();

    let result = shell.run(&mut BrokenInput);

    assert!(matches!(result, Err(ShellError::Io(_))));
    assert_eq!(exits.borrow().len(), 1);
    assert_eq!(shell.state(), ShellState::Terminated);
}

#[test]
fn output_failure_during_dispatch_fires_exit_and_returns_error() {
    let exits = Calls::default();
    let greeted = Calls::default();
    let mut shell = Shell::with_output(
        ShellConfig {
            welcome: String::new(),
            ..ShellConfig::default()
        },
        ClosedSink,
    );
    shell.on("exit", record(&exits)).unwrap();
    shell.cmd("greet", record(&greeted)).unwrap();

    let mut input = ScriptedInput::from_lines(["foo", "greet", "exit"]);
    let result = shell.run(&mut input);

    assert!(matches!(result, Err(ShellError::Io(_))));
    assert_eq!(exits.borrow().len(), 1);
    assert!(greeted.borrow().is_empty());
    assert_eq!(input.remaining(), 2);
    assert_eq!(shell.state(), ShellState::Terminated);
}

#[test]
fn prompt_change_applies_to_next_read() {
    let mut shell = quiet_shell();
    shell.set_setting("prompt", "db> ").unwrap();
    let mut input = ScriptedInput::from_lines(["exit"]);
    shell.run(&mut input).unwrap();
    assert_eq!(input.prompts(), &["db> ".to_string()]);
}
