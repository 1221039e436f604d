use super::table::{CommandTable, DisplayAction};
use super::{prompt_line, INVALID_COMMAND};
use crate::types::{BatchResult, Field};
use std::io::{self, BufRead, Write};

/// Show projections of `batch` until the user is done or input ends.
///
/// Unresolved queries are printed as typed wherever a person line would appear.
pub fn run_display_menu<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    table: &CommandTable<DisplayAction>,
    batch: &BatchResult,
    fields: &[Field],
) -> io::Result<()> {
    writeln!(out, "{}", table.instructions())?;

    loop {
        writeln!(out)?;
        let Some(response) = prompt_line(input, out, "  Enter display command: ")? else {
            break;
        };

        match table.lookup(&response) {
            Some(DisplayAction::All) => {
                writeln!(out, "Printing everything. . .")?;
                for outcome in &batch.outcomes {
                    writeln!(out, "{}", outcome.render(fields))?;
                }
            }
            Some(action @ DisplayAction::Project(field)) => {
                writeln!(out, "Printing {}. . .", projection_name(table, action))?;
                for outcome in &batch.outcomes {
                    writeln!(out, "{}", outcome.project(field))?;
                }
            }
            Some(DisplayAction::Help) => writeln!(out, "{}", table.instructions())?,
            Some(DisplayAction::Done) => break,
            None => writeln!(out, "{}", INVALID_COMMAND)?,
        }
    }
    Ok(())
}

/// "emails" from "Display emails only"
fn projection_name(table: &CommandTable<DisplayAction>, action: DisplayAction) -> &str {
    table
        .label_of(action)
        .map(|label| label.trim_start_matches("Display ").trim_end_matches(" only"))
        .unwrap_or("results")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LookupOutcome, Person};
    use std::io::Cursor;

    const ALL: &[Field] = &[Field::Id, Field::Name, Field::Email, Field::Major, Field::Level];

    fn batch() -> BatchResult {
        BatchResult::new(vec![
            LookupOutcome::Resolved(Person {
                id: "alice".into(),
                name: "Alice A".into(),
                email: "alice@x.edu".into(),
                major: "Physics".into(),
                level: "Junior".into(),
            }),
            LookupOutcome::Missing("ghost".into()),
        ])
    }

    fn run(commands: &str) -> String {
        let mut input = Cursor::new(commands.as_bytes().to_vec());
        let mut out = Vec::new();
        let table = CommandTable::display(ALL, "majors");
        run_display_menu(&mut input, &mut out, &table, &batch(), ALL).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_email_projection_with_missing_fallback() {
        let output = run("2\nd\n");
        assert!(output.contains("Printing emails. . .\nalice@x.edu\nghost\n"));
    }

    #[test]
    fn test_full_record_projection() {
        let output = run("1\nd\n");
        assert!(output.contains("alice,Alice A,alice@x.edu,Physics,Junior\nghost\n"));
    }

    #[test]
    fn test_majors_projection() {
        let output = run("4\nd\n");
        assert!(output.contains("Printing majors. . .\nPhysics\nghost\n"));
    }

    #[test]
    fn test_repeated_projection_is_identical() {
        let output = run("2\n2\nd\n");
        let block = "Printing emails. . .\nalice@x.edu\nghost\n";
        assert_eq!(output.matches(block).count(), 2);
    }

    #[test]
    fn test_titles_label_follows_table() {
        let mut input = Cursor::new(b"4\nd\n".to_vec());
        let mut out = Vec::new();
        let fields = [Field::Id, Field::Name, Field::Email, Field::Major];
        let table = CommandTable::display(&fields, "titles");
        run_display_menu(&mut input, &mut out, &table, &batch(), &fields).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Printing titles. . .\nPhysics\nghost\n"));
    }

    #[test]
    fn test_invalid_command_reprompts() {
        let output = run("9\nd\n");
        assert!(output.contains("INVALID COMMAND"));
        assert_eq!(output.matches("Enter display command:").count(), 2);
    }

    #[test]
    fn test_help_reprints_options() {
        let output = run("h\nd\n");
        assert_eq!(output.matches("[d] Done - Enter a new search").count(), 2);
    }

    #[test]
    fn test_end_of_input_leaves_loop() {
        let output = run("3\n");
        assert!(output.contains("Printing names. . .\nAlice A\nghost\n"));
    }
}
