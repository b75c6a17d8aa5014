use super::CommandLine;

#[test]
fn it_parses_program_and_args() {
    let cmd = CommandLine::parse("arecord -q -f S16_LE  -r 16000 -").unwrap();
    assert_eq!(cmd.program, "arecord");
    assert_eq!(cmd.args, vec!["-q", "-f", "S16_LE", "-r", "16000", "-"]);
}

#[test]
fn it_parses_a_bare_program() {
    let cmd = CommandLine::parse("  espeak ").unwrap();
    assert_eq!(cmd.program, "espeak");
    assert!(cmd.args.is_empty());
}

#[test]
fn it_fails_on_empty_commands() {
    let err = CommandLine::parse("   ").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Command is empty");
}
