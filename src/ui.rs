use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use phases::PhaseProgram;
use util::Timer;

use crate::settings::Settings;

/// All interactions with the text UI should go through this struct.
pub struct Ui {
    /// -v setting, displays extra text info to user
    pub verbose: bool,
    /// keeps track of time for each step
    timer: Timer,
}

impl Ui {
    pub fn new(settings: &Settings) -> Self {
        Self {
            verbose: settings.verbose > 0,
            timer: Timer::now(),
        }
    }

    pub fn start_timer(&mut self) {
        if self.verbose {
            self.timer.reset();
        }
    }

    pub fn print_elapsed(&self, step: &str) {
        if self.verbose {
            self.timer.print_elapsed(step);
        }
    }

    pub fn verbose_progress_debug<T: std::fmt::Debug>(&self, msg: &str, arg: T) {
        if self.verbose {
            eprint!("{} {:?}... ", msg.magenta(), arg);
        }
    }

    pub fn done(&self) {
        if self.verbose {
            eprintln!("{}.", "done".green());
        }
    }

    /// Write one program: its light id, then one line per phase.
    pub fn write_program<W: Write>(&self, out: &mut W, program: &PhaseProgram) -> Result<()> {
        let noun = if program.len() == 1 { "phase" } else { "phases" };
        writeln!(
            out,
            "{} ({} {})",
            program.light_id().cyan(),
            program.len(),
            noun
        )?;
        for (index, state) in program.phases().iter().enumerate() {
            writeln!(out, "  {}: {}", format!("{index:>3}").dimmed(), state)?;
        }
        Ok(())
    }
}
