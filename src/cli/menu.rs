//! Interactive console menu
//!
//! Add / View / Modify / Export / Exit, driven by line-based prompts. Input
//! and output are generic so the flow can run against scripted input.

use std::io::{BufRead, Write};

use crossterm::style::Stylize;

use crate::display::format_record_table;
use crate::error::{SoterradoError, SoterradoResult};
use crate::export::export_report;
use crate::services::parse_meters;

use super::context::Context;
use super::records::{describe_export_outcome, describe_update_outcome, updated_record_details};

/// Menu entries in display order
const OPTIONS: [&str; 5] = [
    "Add undergrounding task",
    "View records",
    "Modify record",
    "Export to spreadsheet",
    "Exit",
];

/// Interactive menu over a context
pub struct Menu<'a, R, W> {
    ctx: &'a Context,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(ctx: &'a Context, input: R, output: W) -> Self {
        Self { ctx, input, output }
    }

    /// Run until the operator exits or input ends
    pub fn run(&mut self) -> SoterradoResult<()> {
        loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("Choose an option")? else {
                break;
            };

            let result = match choice.as_str() {
                "1" => self.add_record(),
                "2" => self.view_records(),
                "3" => self.modify_record(),
                "4" => self.export_records(),
                "5" => break,
                _ => {
                    writeln!(self.output, "{}", "Choose an option from 1 to 5.".red())?;
                    continue;
                }
            };

            if let Err(e) = result {
                writeln!(self.output, "{} {}", "Error:".red().bold(), e)?;
            }
        }

        writeln!(self.output, "{}", "Goodbye!".bold())?;
        Ok(())
    }

    fn print_menu(&mut self) -> SoterradoResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "UNDERGROUNDING RECORDS".cyan().bold())?;
        for (i, option) in OPTIONS.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        Ok(())
    }

    fn add_record(&mut self) -> SoterradoResult<()> {
        writeln!(self.output, "{}", "--- New task ---".yellow().bold())?;

        let Some(meters) = self.prompt_meters("Meters undergrounded")? else {
            return Ok(());
        };
        let Some(technician) = self.prompt("Technician name")? else {
            return Ok(());
        };
        let Some(location) = self.prompt("Location (neighbourhood-lot)")? else {
            return Ok(());
        };
        let Some(supervisor) = self.prompt_supervisor("Was the task supervised?")? else {
            return Ok(());
        };

        let record =
            self.ctx
                .service()
                .create(&meters, &technician, &location, supervisor.as_deref())?;

        writeln!(
            self.output,
            "{}",
            format!("Record {} saved.", record.id).as_str().green().bold()
        )?;
        Ok(())
    }

    fn view_records(&mut self) -> SoterradoResult<()> {
        let records = self.ctx.service().list()?;
        writeln!(self.output, "{}", format_record_table(&records))?;
        Ok(())
    }

    fn modify_record(&mut self) -> SoterradoResult<()> {
        writeln!(self.output, "{}", "--- Modify record ---".yellow().bold())?;
        self.view_records()?;

        let Some(id) = self.prompt("ID of the record to modify")? else {
            return Ok(());
        };
        let Some(meters) = self.prompt_meters("New meters undergrounded")? else {
            return Ok(());
        };
        let Some(supervisor) = self.prompt_supervisor("Was the task supervised?")? else {
            return Ok(());
        };

        let outcome = self
            .ctx
            .service()
            .modify(&id, &meters, supervisor.as_deref())?;

        let message = describe_update_outcome(&outcome);
        if outcome.succeeded() {
            writeln!(self.output, "{}", message.as_str().green().bold())?;
            if let Some(details) = updated_record_details(self.ctx, &outcome)? {
                write!(self.output, "{}", details)?;
            }
        } else {
            writeln!(self.output, "{}", message.as_str().red().bold())?;
        }
        Ok(())
    }

    fn export_records(&mut self) -> SoterradoResult<()> {
        writeln!(self.output, "{}", "Generating spreadsheet...".yellow())?;

        let records = self.ctx.service().list()?;
        let outcome = export_report(&records, &self.ctx.export_path())?;

        writeln!(self.output, "{}", describe_export_outcome(&outcome))?;
        Ok(())
    }

    /// Ask until the answer is a positive number; `None` if input ended
    fn prompt_meters(&mut self, question: &str) -> SoterradoResult<Option<String>> {
        loop {
            let Some(answer) = self.prompt(question)? else {
                return Ok(None);
            };
            match parse_meters(&answer) {
                Ok(_) => return Ok(Some(answer)),
                Err(SoterradoError::Validation(message)) => {
                    writeln!(self.output, "{}", message.as_str().red())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Ask the yes/no supervision question, then the supervisor name if yes
    ///
    /// The outer `None` means input ended; the inner one means unsupervised.
    fn prompt_supervisor(&mut self, question: &str) -> SoterradoResult<Option<Option<String>>> {
        let Some(supervised) = self.confirm(question)? else {
            return Ok(None);
        };
        if !supervised {
            return Ok(Some(None));
        }

        loop {
            let Some(name) = self.prompt("Supervisor name")? else {
                return Ok(None);
            };
            if !name.is_empty() {
                return Ok(Some(Some(name)));
            }
            writeln!(self.output, "{}", "Supervisor name cannot be empty.".red())?;
        }
    }

    fn confirm(&mut self, question: &str) -> SoterradoResult<Option<bool>> {
        let prompt = format!("{} (y/n)", question);
        loop {
            let Some(answer) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            match parse_yes_no(&answer) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.output, "{}", "Please answer y or n.".red())?,
            }
        }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, question: &str) -> SoterradoResult<Option<String>> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Interpret a yes/no answer, accepting English and Spanish forms
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "s" | "si" | "sí" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
