use cmdloop::logging::init_tracing;
use cmdloop::{CommandSpec, EventSpec, HandlerResult, Shell, ShellConfig, ShellError};

fn greet(args: &[String]) -> HandlerResult {
    let name = args.first().map(String::as_str).unwrap_or("world");
    println!("Hello, {name}!");
    Ok(())
}

fn add(args: &[String]) -> HandlerResult {
    let a: i64 = args.first().ok_or("missing operand 'a'")?.parse()?;
    let b: i64 = match args.get(1) {
        Some(raw) => raw.parse()?,
        None => 1,
    };
    let sum = a.checked_add(b).ok_or("result does not fit in a 64-bit integer")?;
    println!("{sum}");
    Ok(())
}

fn echo(args: &[String]) -> HandlerResult {
    println!("{}", args.join(" "));
    Ok(())
}

fn fail(_args: &[String]) -> HandlerResult {
    Err("this command always fails".into())
}

fn start(_args: &[String]) -> HandlerResult {
    println!("cmdloop demo. Try 'greet', 'add 2 3', 'echo', 'fail' or 'exit'.");
    Ok(())
}

fn exit(_args: &[String]) -> HandlerResult {
    println!("Bye.");
    Ok(())
}

fn main() -> Result<(), ShellError> {
    init_tracing();

    let mut shell = Shell::with_config(ShellConfig {
        prompt: "cmdloop> ".to_string(),
        ..ShellConfig::default()
    });

    shell
        .register_command(
            CommandSpec::new(greet)
                .description("Greet someone")
                .param_default("name", "world"),
        )?
        .register_command(
            CommandSpec::new(add)
                .description("Add two integers")
                .param("a")
                .param_default("b", "1"),
        )?
        .register_command(CommandSpec::new(echo).description("Print the arguments back"))?
        .register_command(CommandSpec::new(fail))?
        .register_event(EventSpec::new(start))?
        .register_event(EventSpec::new(exit))?;

    shell.start()
}
