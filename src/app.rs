use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::{Context, Result};

use phases::PhaseProgramTable;

use crate::settings::Settings;
use crate::ui::Ui;

/// This struct actually runs the command-line app.
pub struct App {
    /// Interpreted command line settings
    settings: Settings,
    /// User interface
    ui: Ui,
}

impl App {
    /// Create a new `App`.
    pub fn new(settings: Settings) -> Self {
        let ui = Ui::new(&settings);
        Self { settings, ui }
    }

    /// Load the config file and print the requested programs to stdout.
    pub fn run(mut self) -> Result<()> {
        let table = self.load()?;
        let stdout = std::io::stdout();
        self.report(&table, &mut stdout.lock())
    }

    /// Load the phase table from the config file.
    pub fn load(&mut self) -> Result<PhaseProgramTable> {
        let config = &self.settings.config;
        self.ui.verbose_progress_debug("Loading traffic light programs from", config);
        self.ui.start_timer();

        let file = File::open(config)
            .with_context(|| format!("while opening config file {:?}", config))?;
        let origin = config.display().to_string();
        let reader = BufReader::new(file);
        let table = PhaseProgramTable::from_reader(&origin, reader, self.settings.scan)
            .with_context(|| format!("while loading config file {:?}", config))?;

        self.ui.done();
        self.ui.print_elapsed("Loading traffic light programs");
        log::info!(
            "Found {} traffic lights in {:?}",
            table.len(),
            self.settings.config
        );
        Ok(table)
    }

    /// Write the programs selected in settings (or all of them) to `out`.
    pub fn report<W: Write>(&self, table: &PhaseProgramTable, out: &mut W) -> Result<()> {
        if self.settings.lights.is_empty() {
            for program in table.programs() {
                self.ui.write_program(out, program)?;
            }
        } else {
            for light in &self.settings.lights {
                let program = table.program(light)?;
                self.ui.write_program(out, program)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}
