use super::display::run_display_menu;
use super::table::{CommandTable, DisplayAction, TopAction};
use super::{prompt_line, read_line, INVALID_COMMAND};
use crate::app::LookupUseCase;
use crate::constants::DONE_SENTINEL;
use crate::error::Result;
use crate::types::BatchResult;
use std::fs;
use std::io::{BufRead, Write};
use tracing::{error, info, warn};

/// Top-level command loop
pub struct Shell<'a, R, W> {
    lookup: &'a LookupUseCase,
    input: R,
    out: W,
    top: CommandTable<TopAction>,
    display: CommandTable<DisplayAction>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(lookup: &'a LookupUseCase, input: R, out: W) -> Self {
        let display = CommandTable::display(lookup.fields(), lookup.major_label());
        Self {
            lookup,
            input,
            out,
            top: CommandTable::top_level(),
            display,
        }
    }

    /// Run until `q` or end of input
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "UCI Lookup")?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.top.instructions())?;
        writeln!(self.out)?;

        loop {
            let Some(response) = prompt_line(&mut self.input, &mut self.out, "Enter Command: ")?
            else {
                break;
            };

            match self.top.lookup(&response) {
                Some(TopAction::SingleSearch) => self.single_search().await?,
                Some(TopAction::MultiSearch) => self.multi_search_from_input().await?,
                Some(TopAction::MultiSearchFromFile) => self.multi_search_from_file().await?,
                Some(TopAction::Help) => writeln!(self.out, "{}", self.top.instructions())?,
                Some(TopAction::Quit) => break,
                None => writeln!(self.out, "{}", INVALID_COMMAND)?,
            }
            writeln!(self.out)?;
        }

        writeln!(self.out, "Exiting program. . .")?;
        Ok(())
    }

    fn print_label(&mut self, action: TopAction) -> Result<()> {
        if let Some(label) = self.top.label_of(action) {
            writeln!(self.out, "{}", label)?;
        }
        Ok(())
    }

    async fn single_search(&mut self) -> Result<()> {
        self.print_label(TopAction::SingleSearch)?;
        let Some(query) = prompt_line(&mut self.input, &mut self.out, "  Search: ")? else {
            return Ok(());
        };

        let hit = match self.lookup.find_person(&query).await {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                writeln!(self.out, "No match found for '{}'", query.trim())?;
                return Ok(());
            }
            Err(e) => {
                error!(query = %query.trim(), error = %e, "Single lookup failed");
                writeln!(self.out, "Lookup failed: {}", e)?;
                return Ok(());
            }
        };

        writeln!(self.out, "{}", hit.person.render(self.lookup.fields()))?;

        let answer = prompt_line(&mut self.input, &mut self.out, "\n  Show all info? [y/N]: ")?;
        if matches!(answer.as_deref().map(str::trim), Some("y") | Some("Y")) {
            writeln!(self.out, "Displaying all info. . .")?;
            writeln!(self.out)?;
            writeln!(self.out, "{}", hit.raw)?;
        }
        Ok(())
    }

    async fn multi_search_from_input(&mut self) -> Result<()> {
        self.print_label(TopAction::MultiSearch)?;
        writeln!(
            self.out,
            "Input each search on a new line. Enter '{}' when you are finished",
            DONE_SENTINEL
        )?;
        self.out.flush()?;

        let mut searches = Vec::new();
        while let Some(line) = read_line(&mut self.input)? {
            if line.trim() == DONE_SENTINEL {
                break;
            }
            searches.push(line);
        }

        writeln!(self.out)?;
        self.multi_search(&searches).await
    }

    async fn multi_search_from_file(&mut self) -> Result<()> {
        self.print_label(TopAction::MultiSearchFromFile)?;
        let Some(file_name) = prompt_line(&mut self.input, &mut self.out, "  Enter a file name: ")?
        else {
            return Ok(());
        };
        let file_name = file_name.trim();

        let contents = match fs::read_to_string(file_name) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(file = %file_name, error = %e, "Unable to read search file");
                writeln!(self.out, "Unable to read '{}': {}", file_name, e)?;
                return Ok(());
            }
        };
        let searches: Vec<&str> = contents.lines().map(str::trim).collect();
        info!(file = %file_name, count = searches.len(), "Read searches from file");

        writeln!(self.out)?;
        self.multi_search(&searches).await
    }

    async fn multi_search<S: AsRef<str>>(&mut self, searches: &[S]) -> Result<()> {
        writeln!(self.out, "Loading results. . .")?;
        self.out.flush()?;
        let batch = self.lookup.resolve(searches).await;

        writeln!(self.out, "Printing search results. . .")?;
        self.print_report(&batch)?;

        run_display_menu(
            &mut self.input,
            &mut self.out,
            &self.display,
            &batch,
            self.lookup.fields(),
        )?;
        Ok(())
    }

    fn print_report(&mut self, batch: &BatchResult) -> Result<()> {
        let fields = self.lookup.fields();
        for person in batch.resolved() {
            writeln!(self.out, "{}", person.render(fields))?;
        }
        writeln!(self.out)?;

        let missing = batch.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(String::as_str).collect();
            writeln!(
                self.out,
                "Unable to find the following searches: {{{}}}",
                names.join(", ")
            )?;
            writeln!(self.out)?;
        }

        let failed = batch.failed();
        for (query, reason) in &failed {
            writeln!(self.out, "Lookup failed for: {} ({})", query, reason)?;
        }
        if !failed.is_empty() {
            writeln!(self.out)?;
        }
        Ok(())
    }
}
